use super::text_edit::TextBuffer;
use crate::core::value::Value;
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{DrawOutput, Editor, EditorResult, EditorSeed};

/// Raw JSON text editor. Only text that parses is reported as a change; the
/// last valid value stays in effect while the buffer is broken.
pub struct JsonEditor {
    buffer: TextBuffer,
    parsed: Value,
    parse_error: Option<String>,
}

impl JsonEditor {
    pub fn new() -> Self {
        Self {
            buffer: TextBuffer::default(),
            parsed: Value::None,
            parse_error: None,
        }
    }

    pub fn from_seed(seed: &EditorSeed<'_>) -> Self {
        let mut editor = Self::new();
        editor.set_value(seed.value.clone());
        editor
    }

    pub fn parse_error(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }

    fn reparse(&mut self) -> EditorResult {
        let text = self.buffer.as_str().trim();
        if text.is_empty() {
            self.parse_error = None;
            self.parsed = Value::None;
            return EditorResult::changed(Value::None);
        }
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(json) => {
                self.parse_error = None;
                self.parsed = Value::from_json(json);
                EditorResult::changed(self.parsed.clone())
            }
            Err(err) => {
                self.parse_error = Some(err.to_string());
                EditorResult::handled()
            }
        }
    }
}

impl Default for JsonEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor for JsonEditor {
    fn on_key(&mut self, key: KeyEvent) -> EditorResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('w') if ctrl => {
                if self.buffer.delete_word_left() {
                    return self.reparse();
                }
                EditorResult::ignored()
            }
            KeyCode::Char(_) if ctrl => EditorResult::ignored(),
            KeyCode::Char(ch) => {
                self.buffer.insert_char(ch);
                self.reparse()
            }
            KeyCode::Backspace => {
                if self.buffer.backspace() {
                    return self.reparse();
                }
                EditorResult::ignored()
            }
            KeyCode::Delete => {
                if self.buffer.delete() {
                    return self.reparse();
                }
                EditorResult::ignored()
            }
            KeyCode::Left => {
                self.buffer.move_left();
                EditorResult::handled()
            }
            KeyCode::Right => {
                self.buffer.move_right();
                EditorResult::handled()
            }
            KeyCode::Home => {
                self.buffer.move_home();
                EditorResult::handled()
            }
            KeyCode::End => {
                self.buffer.move_end();
                EditorResult::handled()
            }
            KeyCode::Enter if self.parse_error.is_none() => EditorResult::submit(),
            KeyCode::Enter => EditorResult::handled(),
            _ => EditorResult::ignored(),
        }
    }

    fn draw(&self) -> DrawOutput {
        let mut lines = vec![vec![Span::new(self.buffer.as_str()).no_wrap()]];
        if let Some(err) = &self.parse_error {
            lines.push(vec![
                Span::styled(format!("invalid JSON: {err}"), Style::new().color(Color::Red))
                    .no_wrap(),
            ]);
        }
        DrawOutput { lines }
    }

    fn value(&self) -> Value {
        self.parsed.clone()
    }

    fn set_value(&mut self, value: Value) {
        // A resend of the last good value keeps half-typed text.
        if self.parsed == value {
            return;
        }
        let text = if value.is_none() {
            String::new()
        } else {
            value.to_json_string()
        };
        self.buffer.set(text);
        self.parsed = value;
        self.parse_error = None;
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        Some(CursorPos {
            col: self.buffer.cursor_col(),
            row: 0,
        })
    }
}
