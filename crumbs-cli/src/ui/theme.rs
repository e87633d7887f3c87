use ratatui::style::Color;

/// Dark palette shared by every widget
pub struct Theme {
    pub bg: Color,
    pub bg_surface: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub fg_muted: Color,

    pub blue: Color,
    pub yellow: Color,
    pub red: Color,

    pub border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Share-of-total gradient, small to large
    pub size_small: Color,
    pub size_medium: Color,
    pub size_large: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(30, 30, 46),
            bg_surface: Color::Rgb(49, 50, 68),
            fg: Color::Rgb(205, 214, 244),
            fg_dim: Color::Rgb(166, 173, 200),
            fg_muted: Color::Rgb(127, 132, 156),

            blue: Color::Rgb(137, 180, 250),
            yellow: Color::Rgb(249, 226, 175),
            red: Color::Rgb(243, 139, 168),

            border: Color::Rgb(88, 91, 112),
            selection_bg: Color::Rgb(137, 180, 250),
            selection_fg: Color::Rgb(30, 30, 46),

            size_small: Color::Rgb(166, 227, 161),
            size_medium: Color::Rgb(249, 226, 175),
            size_large: Color::Rgb(243, 139, 168),
        }
    }
}

impl Theme {
    /// Color for an entry's share of all discovered bytes (0-100)
    pub fn size_color(&self, percentage: f64) -> Color {
        if percentage < 10.0 {
            self.size_small
        } else if percentage < 30.0 {
            let t = (percentage - 10.0) / 20.0;
            interpolate_color(self.size_small, self.size_medium, t)
        } else if percentage < 50.0 {
            self.size_medium
        } else {
            let t = ((percentage - 50.0) / 50.0).min(1.0);
            interpolate_color(self.size_medium, self.size_large, t)
        }
    }

    /// Checkbox color: checked entries stand out in the warning color
    pub fn checkbox_color(&self, checked: bool) -> Color {
        if checked { self.red } else { self.fg_muted }
    }
}

fn interpolate_color(from: Color, to: Color, t: f64) -> Color {
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            Color::Rgb(lerp(r1, r2, t), lerp(g1, g2, t), lerp(b1, b2, t))
        }
        _ => to,
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    let a = a as f64;
    let b = b as f64;
    (a + (b - a) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_color_endpoints() {
        let theme = Theme::default();
        assert_eq!(theme.size_color(0.0), theme.size_small);
        assert_eq!(theme.size_color(40.0), theme.size_medium);
        assert_eq!(theme.size_color(100.0), theme.size_large);
    }

    #[test]
    fn test_size_color_interpolates() {
        let theme = Theme::default();
        // Halfway between green (166, 227, 161) and yellow (249, 226, 175)
        assert_eq!(theme.size_color(20.0), Color::Rgb(208, 227, 168));
    }
}
