use crate::core::NodeId;
use crate::core::descriptor::{FieldConfig, OptionSet};
use crate::core::type_tag::TypeTag;
use crate::core::value::Value;
use crate::terminal::{CursorPos, KeyEvent};
use crate::ui::span::{SpanLine, line_text};

// ---------------------------------------------------------------------------
// Draw output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
}

impl DrawOutput {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines as plain text, styles dropped.
    pub fn text_lines(&self) -> Vec<String> {
        self.lines.iter().map(|line| line_text(line)).collect()
    }

    pub fn extend(&mut self, other: DrawOutput) {
        self.lines.extend(other.lines);
    }
}

// ---------------------------------------------------------------------------
// Editor actions
// ---------------------------------------------------------------------------

/// What an editor asks of the field that hosts it. Actions are applied in
/// order by the field's state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// In-flight value changed; forwarded to `on_change` immediately.
    Changed(Value),
    /// The user finished editing; validate, then finalize with `on_submit`.
    Submit,
    /// The editor dismisses itself (e.g. after picking an option).
    Close,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorResult {
    pub handled: bool,
    pub actions: Vec<EditorAction>,
}

impl EditorResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: EditorAction) -> Self {
        Self {
            handled: true,
            actions: vec![action],
        }
    }

    pub fn with_actions(actions: Vec<EditorAction>) -> Self {
        Self {
            handled: true,
            actions,
        }
    }

    pub fn changed(value: Value) -> Self {
        Self::with_action(EditorAction::Changed(value))
    }

    pub fn submit() -> Self {
        Self::with_action(EditorAction::Submit)
    }

    /// Pick-and-dismiss sequence used by list editors.
    pub fn commit(value: Value) -> Self {
        Self::with_actions(vec![
            EditorAction::Changed(value),
            EditorAction::Submit,
            EditorAction::Close,
        ])
    }
}

// ---------------------------------------------------------------------------
// Editor seed
// ---------------------------------------------------------------------------

/// Inputs an editor is built from when a field enters editing.
#[derive(Debug, Clone, Copy)]
pub struct EditorSeed<'a> {
    pub type_tag: &'a TypeTag,
    pub value: &'a Value,
    pub options: &'a OptionSet,
    pub config: &'a FieldConfig,
}

// ---------------------------------------------------------------------------
// Editor: leaf widgets mounted while a field is editing
// ---------------------------------------------------------------------------

pub trait Editor {
    fn on_key(&mut self, key: KeyEvent) -> EditorResult;

    /// Pointer activation of a part inside the editor. `parts` is the element
    /// path below the field container, outermost first.
    fn on_pointer(&mut self, _parts: &[NodeId]) -> EditorResult {
        EditorResult::ignored()
    }

    fn draw(&self) -> DrawOutput;

    fn value(&self) -> Value;

    /// Caller replaced the value while the editor is open.
    fn set_value(&mut self, value: Value);

    fn cursor_pos(&self) -> Option<CursorPos> {
        None
    }
}
