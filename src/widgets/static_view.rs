use crate::core::value::Value;
use crate::terminal::KeyEvent;
use crate::widgets::traits::{DrawOutput, Editor, EditorResult};

/// Editor for read-only columns: draws exactly what the display draws and
/// ignores input.
pub struct StaticView {
    value: Value,
    render: fn(&Value) -> DrawOutput,
}

impl StaticView {
    pub fn new(value: Value, render: fn(&Value) -> DrawOutput) -> Self {
        Self { value, render }
    }
}

impl Editor for StaticView {
    fn on_key(&mut self, _key: KeyEvent) -> EditorResult {
        EditorResult::ignored()
    }

    fn draw(&self) -> DrawOutput {
        (self.render)(&self.value)
    }

    fn value(&self) -> Value {
        self.value.clone()
    }

    fn set_value(&mut self, value: Value) {
        self.value = value;
    }
}
