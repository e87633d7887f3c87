use crumbs_core::{Selection, format_size, size_percentage};
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use super::bar_chart::render_bar;
use super::theme::Theme;

/// One-line bar of the checked share of all discovered bytes
pub struct SummaryBar<'a> {
    selection: &'a Selection,
    theme: &'a Theme,
}

impl<'a> SummaryBar<'a> {
    pub fn new(selection: &'a Selection, theme: &'a Theme) -> Self {
        Self { selection, theme }
    }
}

/// Total estimated bytes over every discovered entry
pub fn total_size(selection: &Selection) -> u64 {
    selection
        .entries()
        .iter()
        .filter_map(|e| e.size_bytes)
        .sum()
}

pub fn summary_label(selection: &Selection) -> String {
    format!(
        "{} of {} selected, {}",
        selection.checked_count(),
        selection.len(),
        format_size(selection.checked_size())
    )
}

impl Widget for SummaryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 {
            return;
        }

        let label = summary_label(self.selection);
        let label_len = label.chars().count() as u16;
        let bar_width = area.width.saturating_sub(label_len + 4) as usize;
        let percentage = size_percentage(self.selection.checked_size(), total_size(self.selection));

        let (bar, color) = render_bar(percentage, bar_width, self.theme.red);
        buf.set_string(area.x + 1, area.y, &bar, Style::default().fg(color));

        if area.width > label_len + 1 {
            buf.set_string(
                area.x + area.width - label_len - 1,
                area.y,
                &label,
                Style::default().fg(self.theme.fg_dim),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crumbs_core::{CatalogEntry, DiscoveredEntry, MenuEvent, Transition};

    #[test]
    fn test_summary_label_counts_checked() {
        let entries = vec![
            DiscoveredEntry::new(CatalogEntry::new("A", ["/a"])).with_size(1024),
            DiscoveredEntry::new(CatalogEntry::new("B", ["/b"])).with_size(2048),
        ];
        let selection = Selection::new(entries).unwrap();
        assert_eq!(summary_label(&selection), "0 of 2 selected, 0 B");

        let Transition::Continue(selection) = selection.transition(MenuEvent::Toggle) else {
            panic!("toggle should continue");
        };
        assert_eq!(summary_label(&selection), "1 of 2 selected, 1.0 KB");
        assert_eq!(total_size(&selection), 3072);
    }
}
