use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub label: Style,
    pub glyph: Style,
    pub glyph_error: Style,
    pub required: Style,
    pub placeholder: Style,
    pub chip: Style,
    pub error: Style,
    pub highlight: Style,
    pub overlay_border: Style,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            label: Style::new().bold(),
            glyph: Style::new().color(Color::DarkGrey),
            glyph_error: Style::new().color(Color::Red),
            required: Style::new().color(Color::Red),
            placeholder: Style::new().color(Color::DarkGrey),
            chip: Style::new().color(Color::Cyan),
            error: Style::new().color(Color::Red).bold(),
            highlight: Style::new().color(Color::Yellow).bold(),
            overlay_border: Style::new().color(Color::DarkGrey),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
