use crate::core::value::Value;
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};

/// Checkbox drawn for `bool` columns in every state. Toggling applies at once;
/// there is no editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    checked: bool,
}

impl Toggle {
    pub fn from_value(value: &Value) -> Self {
        let checked = match value {
            Value::Bool(flag) => *flag,
            Value::Text(text) => matches!(text.to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
            Value::Number(number) => *number != 0.0,
            _ => false,
        };
        Self { checked }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Value after one toggle.
    pub fn flipped(&self) -> Value {
        Value::Bool(!self.checked)
    }

    pub fn span(&self, focused: bool) -> Span {
        let (symbol, color) = match (self.checked, focused) {
            (true, true) => ("[✓]", Color::Green),
            (false, true) => ("[✗]", Color::Red),
            (true, false) => ("[x]", Color::Green),
            (false, false) => ("[ ]", Color::DarkGrey),
        };
        Span::styled(symbol, Style::new().color(color)).no_wrap()
    }
}
