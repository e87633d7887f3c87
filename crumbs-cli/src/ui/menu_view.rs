use crumbs_core::{Selection, format_size, size_percentage};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::bar_chart::render_bar;
use super::summary::total_size;
use super::theme::Theme;

/// Checkbox list of discovered cache targets
pub struct MenuView<'a> {
    selection: &'a Selection,
    scroll_offset: usize,
    theme: &'a Theme,
}

impl<'a> MenuView<'a> {
    pub fn new(selection: &'a Selection, scroll_offset: usize, theme: &'a Theme) -> Self {
        Self {
            selection,
            scroll_offset,
            theme,
        }
    }
}

fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let kept: String = name.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 30 {
            return;
        }

        let total = total_size(self.selection);

        // Right-hand columns: bar, percentage, size
        let bar_width: usize = if area.width >= 80 { 24 } else { 0 };
        let pct_width: usize = 7;
        let size_width: usize = 10;
        let right_width = (bar_width + pct_width + size_width + 1) as u16;
        let name_width = (area.width as usize).saturating_sub(right_width as usize + 7);

        for (i, entry) in self
            .selection
            .entries()
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(area.height as usize)
        {
            let y = area.y + (i - self.scroll_offset) as u16;
            let is_cursor = i == self.selection.cursor();

            let row_style = if is_cursor {
                Style::default()
                    .bg(self.theme.selection_bg)
                    .fg(self.theme.selection_fg)
            } else {
                Style::default().fg(self.theme.fg)
            };
            buf.set_string(area.x, y, " ".repeat(area.width as usize), row_style);

            let mut x = area.x + 1;

            let checkbox = if entry.checked { "[x]" } else { "[ ]" };
            let checkbox_style = if is_cursor {
                row_style.add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(self.theme.checkbox_color(entry.checked))
                    .add_modifier(Modifier::BOLD)
            };
            buf.set_string(x, y, checkbox, checkbox_style);
            x += 4;

            let name_style = if entry.checked || is_cursor {
                row_style.add_modifier(Modifier::BOLD)
            } else {
                row_style
            };
            buf.set_string(x, y, truncate_name(entry.name(), name_width), name_style);

            let right_x = area.x + area.width - right_width;
            let percentage = entry
                .size_bytes
                .map(|s| size_percentage(s, total))
                .unwrap_or(0.0);

            if bar_width > 0 {
                let bar_color = if is_cursor {
                    self.theme.selection_fg
                } else {
                    self.theme.size_color(percentage)
                };
                let (bar, _) = render_bar(percentage, bar_width - 1, bar_color);
                let bar_style = if is_cursor {
                    row_style
                } else {
                    Style::default().fg(bar_color)
                };
                buf.set_string(right_x, y, &bar, bar_style);
            }

            let dim_style = if is_cursor {
                row_style
            } else {
                Style::default().fg(self.theme.fg_dim)
            };
            let pct_str = match entry.size_bytes {
                Some(_) => format!("{:>6.1}%", percentage),
                None => format!("{:>7}", ""),
            };
            buf.set_string(right_x + bar_width as u16, y, &pct_str, dim_style);

            let size_str = match entry.size_bytes {
                Some(size) => format!("{:>9}", format_size(size)),
                None => format!("{:>9}", "?"),
            };
            buf.set_string(
                right_x + (bar_width + pct_width) as u16 + 1,
                y,
                &size_str,
                dim_style,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crumbs_core::{CatalogEntry, DiscoveredEntry};

    fn render(selection: &Selection, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        MenuView::new(selection, 0, &Theme::default()).render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_rows_show_checkbox_name_and_size() {
        let mut checked = DiscoveredEntry::new(CatalogEntry::new("Firefox", ["/f"])).with_size(3072);
        checked.checked = true;
        let entries = vec![
            checked,
            DiscoveredEntry::new(CatalogEntry::new("Chrome", ["/c"])).with_size(1024),
        ];
        let selection = Selection::new(entries).unwrap();
        let buf = render(&selection, 60, 4);

        let first = row(&buf, 0);
        assert!(first.starts_with(" [x] Firefox"));
        assert!(first.contains("75.0%"));
        assert!(first.contains("3.0 KB"));
        assert!(row(&buf, 1).starts_with(" [ ] Chrome"));
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short", 10), "Short");
        assert_eq!(truncate_name("A very long cache name", 10), "A very ...");
    }
}
