use super::text_edit::TextBuffer;
use crate::core::type_tag::TypeTag;
use crate::core::value::Value;
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{DrawOutput, Editor, EditorResult, EditorSeed};

/// How the buffer maps to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextKind {
    #[default]
    Plain,
    Number,
    Password,
    /// Comma separated list of strings.
    Csv,
}

impl TextKind {
    pub fn for_tag(tag: &TypeTag) -> Self {
        match tag {
            TypeTag::Number => Self::Number,
            TypeTag::Password => Self::Password,
            TypeTag::Csv => Self::Csv,
            _ => Self::Plain,
        }
    }
}

/// Single-line input used by text, number, password, email, url and csv
/// columns.
pub struct TextEditor {
    buffer: TextBuffer,
    kind: TextKind,
    prevent_spaces: bool,
}

impl TextEditor {
    pub fn new(kind: TextKind) -> Self {
        Self {
            buffer: TextBuffer::default(),
            kind,
            prevent_spaces: false,
        }
    }

    pub fn from_seed(seed: &EditorSeed<'_>) -> Self {
        let mut editor = Self::new(TextKind::for_tag(seed.type_tag))
            .with_prevent_spaces(seed.config.prevent_spaces);
        editor.set_value(seed.value.clone());
        editor
    }

    pub fn with_prevent_spaces(mut self, prevent_spaces: bool) -> Self {
        self.prevent_spaces = prevent_spaces;
        self
    }

    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    fn text_of(&self, value: &Value) -> String {
        match (self.kind, value) {
            (TextKind::Csv, Value::List(items)) => items
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            (_, other) => other.to_string(),
        }
    }

    fn accepts(&self, ch: char) -> bool {
        if ch == ' ' && self.prevent_spaces {
            return false;
        }
        match self.kind {
            TextKind::Number => ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | 'e' | 'E'),
            _ => !ch.is_control(),
        }
    }

    fn masked(&self) -> String {
        "*".repeat(self.buffer.len())
    }

    fn edited(&self) -> EditorResult {
        EditorResult::changed(self.value())
    }
}

impl Editor for TextEditor {
    fn on_key(&mut self, key: KeyEvent) -> EditorResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('w') if ctrl => {
                if self.buffer.delete_word_left() {
                    return self.edited();
                }
                EditorResult::ignored()
            }
            KeyCode::Char(_) if ctrl => EditorResult::ignored(),
            KeyCode::Char(ch) => {
                if !self.accepts(ch) {
                    return EditorResult::handled();
                }
                self.buffer.insert_char(ch);
                self.edited()
            }
            KeyCode::Backspace => {
                let changed = if ctrl {
                    self.buffer.delete_word_left()
                } else {
                    self.buffer.backspace()
                };
                if changed {
                    return self.edited();
                }
                EditorResult::ignored()
            }
            KeyCode::Delete => {
                let changed = if ctrl {
                    self.buffer.delete_word_right()
                } else {
                    self.buffer.delete()
                };
                if changed {
                    return self.edited();
                }
                EditorResult::ignored()
            }
            KeyCode::Left => {
                if self.buffer.move_left() {
                    return EditorResult::handled();
                }
                EditorResult::ignored()
            }
            KeyCode::Right => {
                if self.buffer.move_right() {
                    return EditorResult::handled();
                }
                EditorResult::ignored()
            }
            KeyCode::Home => {
                self.buffer.move_home();
                EditorResult::handled()
            }
            KeyCode::End => {
                self.buffer.move_end();
                EditorResult::handled()
            }
            KeyCode::Enter => EditorResult::submit(),
            _ => EditorResult::ignored(),
        }
    }

    fn draw(&self) -> DrawOutput {
        let shown = match self.kind {
            TextKind::Password => self.masked(),
            _ => self.buffer.as_str().to_string(),
        };
        let line = if shown.is_empty() {
            vec![Span::styled("…", Style::new().color(Color::DarkGrey)).no_wrap()]
        } else {
            vec![Span::new(shown).no_wrap()]
        };
        DrawOutput { lines: vec![line] }
    }

    fn value(&self) -> Value {
        let text = self.buffer.as_str();
        match self.kind {
            TextKind::Plain | TextKind::Password => Value::Text(text.to_string()),
            TextKind::Number => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Value::None
                } else {
                    trimmed
                        .parse::<f64>()
                        .map(Value::Number)
                        .unwrap_or_else(|_| Value::Text(text.to_string()))
                }
            }
            TextKind::Csv => Value::List(
                text.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(Value::from)
                    .collect(),
            ),
        }
    }

    fn set_value(&mut self, value: Value) {
        if self.value() == value {
            return;
        }
        let text = self.text_of(&value);
        self.buffer.set(text);
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let col = match self.kind {
            TextKind::Password => self.buffer.cursor() as u16,
            _ => self.buffer.cursor_col(),
        };
        Some(CursorPos { col, row: 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::{TextEditor, TextKind};
    use crate::core::value::Value;
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
    use crate::widgets::traits::{Editor, EditorAction};

    fn type_text(editor: &mut TextEditor, text: &str) -> Vec<EditorAction> {
        text.chars()
            .flat_map(|ch| editor.on_key(KeyEvent::char(ch)).actions)
            .collect()
    }

    #[test]
    fn every_keystroke_reports_the_new_value() {
        let mut editor = TextEditor::new(TextKind::Plain);
        let actions = type_text(&mut editor, "hi");
        assert_eq!(
            actions,
            vec![
                EditorAction::Changed(Value::from("h")),
                EditorAction::Changed(Value::from("hi")),
            ]
        );
    }

    #[test]
    fn prevent_spaces_swallows_space_without_change() {
        let mut editor = TextEditor::new(TextKind::Plain).with_prevent_spaces(true);
        type_text(&mut editor, "a b");
        assert_eq!(editor.text(), "ab");
        let result = editor.on_key(KeyEvent::char(' '));
        assert!(result.handled);
        assert!(result.actions.is_empty());
    }

    #[test]
    fn number_kind_parses_and_filters_input() {
        let mut editor = TextEditor::new(TextKind::Number);
        type_text(&mut editor, "4x2");
        assert_eq!(editor.value(), Value::Number(42.0));
        editor.on_key(KeyEvent::plain(KeyCode::Backspace));
        editor.on_key(KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(editor.value(), Value::None);
    }

    #[test]
    fn csv_kind_splits_on_commas() {
        let mut editor = TextEditor::new(TextKind::Csv);
        editor.set_value(Value::from(vec!["a", "b"]));
        assert_eq!(editor.text(), "a, b");
        type_text(&mut editor, ", c");
        assert_eq!(editor.value(), Value::from(vec!["a", "b", "c"]));
    }

    #[test]
    fn password_draw_is_masked() {
        let mut editor = TextEditor::new(TextKind::Password);
        type_text(&mut editor, "s3cret");
        assert_eq!(editor.draw().text_lines(), vec!["******".to_string()]);
    }

    #[test]
    fn enter_submits_without_reporting_a_change() {
        let mut editor = TextEditor::new(TextKind::Plain);
        type_text(&mut editor, "x");
        assert_eq!(
            editor.on_key(KeyEvent::plain(KeyCode::Enter)).actions,
            vec![EditorAction::Submit]
        );
        assert_eq!(editor.value(), Value::from("x"));
    }

    #[test]
    fn ctrl_w_deletes_previous_word() {
        let mut editor = TextEditor::new(TextKind::Plain);
        type_text(&mut editor, "hello world");
        let result = editor.on_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(result.actions, vec![EditorAction::Changed(Value::from("hello "))]);
    }
}
