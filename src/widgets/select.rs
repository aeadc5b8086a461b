use crate::core::NodeId;
use crate::core::descriptor::OptionSet;
use crate::core::type_tag::TypeTag;
use crate::core::value::Value;
use crate::terminal::{CursorPos, KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{DrawOutput, Editor, EditorAction, EditorResult, EditorSeed};

/// Element id prefix of option rows, e.g. `option:2`.
pub const OPTION_PART: &str = "option";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// Picking an option commits it and closes the editor.
    Single,
    /// Space or a click toggles an option and reports the new list at once;
    /// Enter submits and closes.
    Multi,
}

/// Option list used by select and relation columns.
pub struct SelectEditor {
    options: OptionSet,
    mode: SelectMode,
    highlighted: usize,
    selected: Vec<Value>,
}

impl SelectEditor {
    pub fn new(options: OptionSet, mode: SelectMode) -> Self {
        Self {
            options,
            mode,
            highlighted: 0,
            selected: Vec::new(),
        }
    }

    pub fn from_seed(seed: &EditorSeed<'_>) -> Self {
        let mode = match (seed.type_tag, seed.value) {
            (TypeTag::Select, Value::List(_)) => SelectMode::Multi,
            _ => SelectMode::Single,
        };
        let mut editor = Self::new(seed.options.clone(), mode);
        editor.set_value(seed.value.clone());
        editor
    }

    pub fn mode(&self) -> SelectMode {
        self.mode
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    fn is_selected(&self, value: &Value) -> bool {
        self.selected.iter().any(|selected| selected == value)
    }

    fn move_up(&mut self) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let len = self.options.len();
        self.highlighted = (self.highlighted + len - 1) % len;
        true
    }

    fn move_down(&mut self) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let len = self.options.len();
        self.highlighted = (self.highlighted + 1) % len;
        true
    }

    fn toggle(&mut self, index: usize) -> bool {
        let Some(entry) = self.options.get(index) else {
            return false;
        };
        let value = entry.value().clone();
        if let Some(pos) = self.selected.iter().position(|selected| *selected == value) {
            self.selected.remove(pos);
        } else {
            self.selected.push(value);
        }
        true
    }

    fn pick(&mut self, index: usize) -> EditorResult {
        match self.mode {
            SelectMode::Single => {
                let Some(entry) = self.options.get(index) else {
                    return EditorResult::ignored();
                };
                let value = entry.value().clone();
                self.selected = vec![value.clone()];
                EditorResult::commit(value)
            }
            SelectMode::Multi => {
                if self.toggle(index) {
                    EditorResult::changed(self.value())
                } else {
                    EditorResult::ignored()
                }
            }
        }
    }
}

impl Editor for SelectEditor {
    fn on_key(&mut self, key: KeyEvent) -> EditorResult {
        match key.code {
            KeyCode::Up => {
                if self.move_up() {
                    return EditorResult::handled();
                }
                EditorResult::ignored()
            }
            KeyCode::Down => {
                if self.move_down() {
                    return EditorResult::handled();
                }
                EditorResult::ignored()
            }
            KeyCode::Char(' ') if self.mode == SelectMode::Multi => self.pick(self.highlighted),
            KeyCode::Enter => match self.mode {
                SelectMode::Single => self.pick(self.highlighted),
                SelectMode::Multi => {
                    EditorResult::with_actions(vec![EditorAction::Submit, EditorAction::Close])
                }
            },
            _ => EditorResult::ignored(),
        }
    }

    fn on_pointer(&mut self, parts: &[NodeId]) -> EditorResult {
        let Some(index) = parts.iter().rev().find_map(|part| part.indexed_part(OPTION_PART)) else {
            return EditorResult::ignored();
        };
        self.highlighted = index.min(self.options.len().saturating_sub(1));
        self.pick(index)
    }

    fn draw(&self) -> DrawOutput {
        if self.options.is_empty() {
            return DrawOutput {
                lines: vec![vec![
                    Span::styled("No options", Style::new().color(Color::DarkGrey)).no_wrap(),
                ]],
            };
        }

        let lines = self
            .options
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let active = idx == self.highlighted;
                let marker = if active { "› " } else { "  " };
                let check = match self.mode {
                    SelectMode::Single => "",
                    SelectMode::Multi if self.is_selected(entry.value()) => "[x] ",
                    SelectMode::Multi => "[ ] ",
                };
                let style = if active {
                    Style::new().color(Color::Cyan).bold()
                } else {
                    Style::default()
                };
                vec![
                    Span::new(marker).no_wrap(),
                    Span::new(check).no_wrap(),
                    Span::styled(entry.label(), style).no_wrap(),
                ]
            })
            .collect();
        DrawOutput { lines }
    }

    fn value(&self) -> Value {
        match self.mode {
            SelectMode::Single => self.selected.first().cloned().unwrap_or_default(),
            SelectMode::Multi => Value::List(self.selected.clone()),
        }
    }

    fn set_value(&mut self, value: Value) {
        self.selected = match value {
            Value::None => Vec::new(),
            Value::List(items) => items,
            other => vec![other],
        };
        self.highlighted = self
            .selected
            .first()
            .and_then(|first| self.options.position(first))
            .unwrap_or(0);
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        Some(CursorPos {
            col: 0,
            row: self.highlighted as u16,
        })
    }
}
