use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::AppMode;

use super::theme::Theme;

/// Footer widget showing keyboard hints
pub struct Footer<'a> {
    mode: AppMode,
    dry_run: bool,
    theme: &'a Theme,
}

impl<'a> Footer<'a> {
    pub fn new(mode: AppMode, dry_run: bool, theme: &'a Theme) -> Self {
        Self {
            mode,
            dry_run,
            theme,
        }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        match self.mode {
            AppMode::Browsing => vec![
                ("↑↓", "Navigate"),
                ("Space", "Toggle"),
                ("a", "All"),
                ("c", if self.dry_run { "Preview" } else { "Clean" }),
                ("?", "Help"),
                ("q", "Quit"),
            ],
            AppMode::Help => vec![("Esc", "Close help"), ("Ctrl+C", "Quit")],
        }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let key_style = Style::default()
            .fg(self.theme.fg)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(self.theme.fg_dim);
        let sep_style = Style::default().fg(self.theme.border);

        let hints = self.hints();
        let mut x = area.x + 1;
        for (i, (key, desc)) in hints.iter().enumerate() {
            buf.set_string(x, area.y, *key, key_style);
            x += key.chars().count() as u16 + 1;

            buf.set_string(x, area.y, *desc, desc_style);
            x += desc.len() as u16;

            if i < hints.len() - 1 {
                buf.set_string(x, area.y, "  │  ", sep_style);
                x += 5;
            }

            if x >= area.x + area.width - 5 {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_hint_follows_dry_run() {
        let theme = Theme::default();
        let live = Footer::new(AppMode::Browsing, false, &theme).hints();
        let dry = Footer::new(AppMode::Browsing, true, &theme).hints();
        assert!(live.contains(&("c", "Clean")));
        assert!(dry.contains(&("c", "Preview")));
    }
}
