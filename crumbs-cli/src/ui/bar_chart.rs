use ratatui::style::Color;

/// Unicode partial block characters for smooth progress bars
const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Render a size bar using partial block characters
pub fn render_bar(percentage: f64, width: usize, color: Color) -> (String, Color) {
    if width == 0 {
        return (String::new(), color);
    }

    let percentage = percentage.clamp(0.0, 100.0);
    let filled = (percentage / 100.0) * width as f64;
    let full_blocks = (filled.floor() as usize).min(width);
    let partial = ((filled - full_blocks as f64) * 8.0).round() as usize;

    let mut bar: String = std::iter::repeat_n(BLOCKS[8], full_blocks).collect();
    if full_blocks < width && partial > 0 {
        bar.push(BLOCKS[partial.min(8)]);
    }

    let pad = width - bar.chars().count();
    bar.extend(std::iter::repeat_n(' ', pad));

    (bar, color)
}
