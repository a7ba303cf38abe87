use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub positive: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(96, 120, 240),
            border: Color::Rgb(140, 100, 220),
            positive: Color::Rgb(16, 185, 129),
            error: Color::Rgb(239, 68, 68),
        }
    }
}
