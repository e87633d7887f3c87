use crumbs_core::DiskSnapshot;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Browsing the cache list
    Browsing,
    /// Showing help overlay
    Help,
}

/// Presentation state of the menu. Checked flags and the cursor live in
/// `crumbs_core::Selection`; this only tracks what the terminal shows.
pub struct AppState {
    /// Current mode
    pub mode: AppMode,
    /// Whether the run will only report what it would delete
    pub dry_run: bool,
    /// First visible row of the list
    pub scroll_offset: usize,
    /// Visible area height (set by UI)
    pub visible_height: usize,
    /// Disk holding the home directory, when it could be measured
    pub disk: Option<DiskSnapshot>,
}

impl AppState {
    pub fn new(dry_run: bool, disk: Option<DiskSnapshot>) -> Self {
        Self {
            mode: AppMode::Browsing,
            dry_run,
            scroll_offset: 0,
            visible_height: 20,
            disk,
        }
    }

    /// Scroll so that `cursor` is inside the visible window
    pub fn ensure_visible(&mut self, cursor: usize) {
        let height = self.visible_height.max(1);
        if cursor < self.scroll_offset {
            self.scroll_offset = cursor;
        } else if cursor >= self.scroll_offset + height {
            self.scroll_offset = cursor - height + 1;
        }
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
    }

    pub fn hide_help(&mut self) {
        self.mode = AppMode::Browsing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_visible_scrolls_down_and_up() {
        let mut state = AppState::new(false, None);
        state.visible_height = 5;

        state.ensure_visible(4);
        assert_eq!(state.scroll_offset, 0);

        state.ensure_visible(7);
        assert_eq!(state.scroll_offset, 3);

        state.ensure_visible(1);
        assert_eq!(state.scroll_offset, 1);
    }

    #[test]
    fn test_zero_height_does_not_underflow() {
        let mut state = AppState::new(false, None);
        state.visible_height = 0;
        state.ensure_visible(3);
        assert_eq!(state.scroll_offset, 3);
    }

    #[test]
    fn test_help_toggle() {
        let mut state = AppState::new(true, None);
        assert_eq!(state.mode, AppMode::Browsing);
        state.show_help();
        assert_eq!(state.mode, AppMode::Help);
        state.hide_help();
        assert_eq!(state.mode, AppMode::Browsing);
        assert!(state.dry_run);
    }
}
