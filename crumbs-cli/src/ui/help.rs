use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use super::theme::Theme;

const HELP_ITEMS: &[(&str, &str, bool)] = &[
    ("", "Navigation", true),
    ("↑ w k", "Move up", false),
    ("↓ s j", "Move down", false),
    ("", "", false),
    ("", "Selection", true),
    ("Space Enter", "Toggle cache target", false),
    ("a", "Select all / none", false),
    ("c", "Clean checked targets", false),
    ("", "", false),
    ("", "Other", true),
    ("?", "Toggle this help", false),
    ("q Esc", "Quit without cleaning", false),
    ("Ctrl+C", "Quit without cleaning", false),
];

/// Help overlay widget
pub struct HelpView<'a> {
    theme: &'a Theme,
}

impl<'a> HelpView<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 24 || area.height < 7 {
            return;
        }

        let width = 46.min(area.width.saturating_sub(4));
        let height = (HELP_ITEMS.len() as u16 + 4).min(area.height.saturating_sub(2));
        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 2;
        let help_area = Rect::new(x, y, width, height);

        Clear.render(help_area, buf);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.blue))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));

        let inner = block.inner(help_area);
        block.render(help_area, buf);

        let key_style = Style::default()
            .fg(self.theme.yellow)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(self.theme.fg);
        let section_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);

        for (i, (key, desc, is_section)) in HELP_ITEMS.iter().enumerate() {
            if i >= inner.height as usize {
                break;
            }

            let y = inner.y + i as u16;
            if *is_section {
                buf.set_string(inner.x, y, *desc, section_style);
            } else if !key.is_empty() {
                buf.set_string(inner.x, y, format!("{:14}", key), key_style);
                buf.set_string(inner.x + 14, y, *desc, desc_style);
            }
        }
    }
}
