use crumbs_core::{DiskSnapshot, format_size};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::AppState;

use super::theme::Theme;

/// Header widget showing title, mode and disk status
pub struct Header<'a> {
    state: &'a AppState,
    found: usize,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState, found: usize, theme: &'a Theme) -> Self {
        Self {
            state,
            found,
            theme,
        }
    }
}

/// Right-hand disk label; an unmeasured disk shows as N/A
pub fn disk_label(disk: Option<&DiskSnapshot>) -> String {
    match disk {
        Some(d) => format!(
            "{} free of {}",
            format_size(d.free_bytes),
            format_size(d.total_bytes)
        ),
        None => "Disk: N/A".to_string(),
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 40 || area.height < 1 {
            return;
        }

        let title_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);
        buf.set_string(area.x + 1, area.y, "CRUMBS", title_style);
        buf.set_string(
            area.x + 8,
            area.y,
            "─",
            Style::default().fg(self.theme.border),
        );

        let subtitle = format!(
            "{} cache target{} found",
            self.found,
            if self.found == 1 { "" } else { "s" }
        );
        buf.set_string(
            area.x + 10,
            area.y,
            &subtitle,
            Style::default().fg(self.theme.fg),
        );

        let mut x = area.x + 10 + subtitle.len() as u16 + 2;
        if self.state.dry_run && x + 9 < area.x + area.width {
            let badge_style = Style::default()
                .fg(self.theme.yellow)
                .add_modifier(Modifier::BOLD);
            buf.set_string(x, area.y, "[DRY RUN]", badge_style);
            x += 11;
        }

        let status = disk_label(self.state.disk.as_ref());
        let status_len = status.chars().count() as u16;
        if area.width > status_len + 2 {
            let status_x = area.x + area.width - status_len - 2;
            if status_x > x {
                buf.set_string(status_x, area.y, &status, Style::default().fg(self.theme.fg_dim));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_label() {
        let disk = DiskSnapshot {
            free_bytes: 2 * 1024 * 1024 * 1024,
            total_bytes: 8 * 1024 * 1024 * 1024,
        };
        assert_eq!(disk_label(Some(&disk)), "2.0 GB free of 8.0 GB");
        assert_eq!(disk_label(None), "Disk: N/A");
    }
}
