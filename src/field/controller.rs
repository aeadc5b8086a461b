use super::registry::{TypeHints, TypeRegistry};
use super::validation::ValidationEngine;
use super::view::{FieldView, LabelView};
use crate::core::NodeId;
use crate::core::descriptor::FieldDescriptor;
use crate::core::type_tag::TypeTag;
use crate::core::value::Value;
use crate::interaction::document::{Delivery, Document, ListenerSet, OverlayLease};
use crate::interaction::keymap::{FieldCommand, KeyBindings};
use crate::terminal::{CursorPos, KeyEvent};
use crate::ui::span::SpanLine;
use crate::ui::theme::Theme;
use crate::widgets::toggle::Toggle;
use crate::widgets::traits::{DrawOutput, Editor, EditorAction, EditorResult, EditorSeed};
use crate::widgets::validators::Validator;
use tracing::debug;

pub type ChangeHandler = Box<dyn FnMut(Value)>;
pub type Handler = Box<dyn FnMut()>;
/// Writes the caller-owned validation trigger back.
pub type TriggerReset = Box<dyn FnMut(bool)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Escape,
    Tab,
    Submit,
    /// The editor closed itself.
    Close,
    /// Click outside the field.
    Dismiss,
}

/// Snapshot of the per-instance edit state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditState {
    pub editing: bool,
    pub error: String,
}

struct EditSession {
    editor: Box<dyn Editor>,
    // Held for its drop.
    _lease: Option<OverlayLease>,
}

/// One record column rendered in place: a read display that turns into a
/// type-specific editor on activation.
pub struct Field {
    id: NodeId,
    descriptor: FieldDescriptor,
    engine: ValidationEngine,
    on_change: Option<ChangeHandler>,
    on_submit: Option<Handler>,
    on_close: Option<Handler>,
    trigger_reset: Option<TriggerReset>,
    trigger_armed: bool,
    validate_on_blur: bool,
    disabled: bool,
    tab_index: bool,
    focus_on_mount: bool,
    children: Vec<SpanLine>,
    keys: KeyBindings,
    theme: Theme,
    document: Option<Document>,
    listeners: ListenerSet,
    session: Option<EditSession>,
}

impl Field {
    pub fn new(id: impl Into<NodeId>, descriptor: FieldDescriptor) -> Self {
        Self {
            id: id.into(),
            descriptor,
            engine: ValidationEngine::default(),
            on_change: None,
            on_submit: None,
            on_close: None,
            trigger_reset: None,
            trigger_armed: false,
            validate_on_blur: true,
            disabled: false,
            tab_index: true,
            focus_on_mount: false,
            children: Vec::new(),
            keys: KeyBindings::new(),
            theme: Theme::default(),
            document: None,
            listeners: ListenerSet::default(),
            session: None,
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.engine.set_validator(Some(validator));
        self
    }

    pub fn on_change(mut self, handler: impl FnMut(Value) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    pub fn on_submit(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_submit = Some(Box::new(handler));
        self
    }

    pub fn on_close(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(handler));
        self
    }

    pub fn with_trigger_reset(mut self, reset: impl FnMut(bool) + 'static) -> Self {
        self.trigger_reset = Some(Box::new(reset));
        self
    }

    pub fn validate_on_blur(mut self, validate_on_blur: bool) -> Self {
        self.validate_on_blur = validate_on_blur;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether the container takes part in the Tab order.
    pub fn tab_index(mut self, tab_index: bool) -> Self {
        self.tab_index = tab_index;
        self
    }

    pub fn focus_on_mount(mut self, focus_on_mount: bool) -> Self {
        self.focus_on_mount = focus_on_mount;
        self
    }

    pub fn with_children(mut self, children: Vec<SpanLine>) -> Self {
        self.children = children;
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn value(&self) -> &Value {
        &self.descriptor.value
    }

    pub fn type_tag(&self) -> &TypeTag {
        &self.descriptor.type_tag
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_mounted(&self) -> bool {
        self.document.is_some()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn error(&self) -> &str {
        self.engine.error()
    }

    pub fn state(&self) -> EditState {
        EditState {
            editing: self.is_editing(),
            error: self.engine.error().to_string(),
        }
    }

    pub fn cursor_pos(&self) -> Option<CursorPos> {
        self.session.as_ref()?.editor.cursor_pos()
    }

    fn hints(&self) -> TypeHints {
        TypeRegistry::hints(&self.descriptor.type_tag)
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Registers the container's click, focus and key listeners.
    pub fn mount(&mut self, document: &Document) {
        if self.is_mounted() {
            self.unmount();
        }
        TypeRegistry::resolve(&self.descriptor.type_tag);
        self.listeners.push(document.listen_click(&self.id));
        self.listeners
            .push(document.listen_focus(&self.id, self.tab_index));
        self.listeners.push(document.listen_keys(&self.id));
        self.document = Some(document.clone());
        debug!(field = %self.id, type_tag = %self.descriptor.type_tag, "field mounted");

        if self.focus_on_mount && !self.disabled {
            document.set_active(Some(self.id.clone()));
            self.activate();
        }
    }

    /// Drops every listener and any open editor without firing handlers.
    pub fn unmount(&mut self) {
        self.session = None;
        self.listeners.clear();
        self.document = None;
        debug!(field = %self.id, "field unmounted");
    }

    /// Replaces the descriptor, as the caller does after every value change.
    pub fn set_descriptor(&mut self, descriptor: FieldDescriptor) {
        let retyped = descriptor.type_tag != self.descriptor.type_tag;
        self.descriptor = descriptor;
        if retyped {
            self.exit(ExitReason::Close);
            return;
        }
        self.sync_editor();
    }

    pub fn set_value(&mut self, value: Value) {
        self.descriptor.value = value;
        self.sync_editor();
    }

    fn sync_editor(&mut self) {
        if let Some(session) = &mut self.session {
            session.editor.set_value(self.descriptor.value.clone());
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&mut self) -> bool {
        self.engine.validate(&self.descriptor.value)
    }

    /// Feeds the caller-owned trigger. A rising edge validates the current
    /// value and writes the trigger back to `false`.
    pub fn sync_validation_trigger(&mut self, trigger: bool) -> bool {
        let rising = trigger && !self.trigger_armed;
        self.trigger_armed = trigger;
        if !rising {
            return false;
        }
        self.validate();
        if let Some(reset) = &mut self.trigger_reset {
            reset(false);
            self.trigger_armed = false;
        }
        true
    }

    // -----------------------------------------------------------------------
    // State machine
    // -----------------------------------------------------------------------

    /// Display -> Editing. No-op while editing, disabled, or for types
    /// without an edit state.
    pub fn activate(&mut self) -> bool {
        if self.disabled || self.session.is_some() || !self.hints().has_edit_state {
            return false;
        }
        let seed = EditorSeed {
            type_tag: &self.descriptor.type_tag,
            value: &self.descriptor.value,
            options: &self.descriptor.options,
            config: &self.descriptor.config,
        };
        let Some(editor) = TypeRegistry::select_editor(&seed) else {
            return false;
        };
        let lease = self
            .document
            .as_ref()
            .map(|document| document.open_overlay(&self.id, &self.id));
        self.session = Some(EditSession {
            editor,
            _lease: lease,
        });
        debug!(field = %self.id, "field entered editing");
        true
    }

    /// Editing -> Display. Releases the overlay and fires `on_close`.
    pub fn exit(&mut self, reason: ExitReason) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        drop(session);
        debug!(field = %self.id, ?reason, "field left editing");
        if let Some(handler) = &mut self.on_close {
            handler();
        }
        true
    }

    /// Flips a `bool` column and submits at once.
    pub fn toggle(&mut self) -> bool {
        if self.disabled || self.descriptor.type_tag != TypeTag::Bool {
            return false;
        }
        let next = Toggle::from_value(&self.descriptor.value).flipped();
        self.change(next);
        if let Some(handler) = &mut self.on_submit {
            handler();
        }
        true
    }

    fn change(&mut self, value: Value) {
        self.descriptor.value = value.clone();
        if let Some(handler) = &mut self.on_change {
            handler(value);
        }
    }

    fn submit(&mut self) -> bool {
        if !self.validate() {
            return false;
        }
        if let Some(handler) = &mut self.on_submit {
            handler();
        }
        self.exit(ExitReason::Submit);
        true
    }

    fn apply(&mut self, result: EditorResult) -> bool {
        for action in result.actions {
            match action {
                EditorAction::Changed(value) => self.change(value),
                EditorAction::Submit => {
                    if !self.submit() {
                        break;
                    }
                }
                EditorAction::Close => {
                    self.exit(ExitReason::Close);
                }
            }
        }
        result.handled
    }

    // -----------------------------------------------------------------------
    // Deliveries
    // -----------------------------------------------------------------------

    pub fn deliver(&mut self, delivery: Delivery) -> bool {
        match delivery {
            Delivery::Dismiss { .. } => self.on_dismiss(),
            Delivery::Click { inner, .. } => self.on_click(&inner),
            Delivery::Focus { .. } => self.on_focus(),
            Delivery::Key { key, .. } => self.on_key(key),
            Delivery::Bubble { .. } => false,
        }
    }

    /// Pointer activation inside the container. `inner` is the element path
    /// below it.
    pub fn on_click(&mut self, inner: &[NodeId]) -> bool {
        if self.descriptor.type_tag == TypeTag::Bool {
            return self.toggle();
        }
        match &mut self.session {
            Some(session) if !inner.is_empty() => {
                let result = session.editor.on_pointer(inner);
                self.apply(result)
            }
            Some(_) => false,
            None => self.activate(),
        }
    }

    /// Keyboard or programmatic focus of the container.
    pub fn on_focus(&mut self) -> bool {
        self.activate()
    }

    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        let command = self.keys.resolve(key);
        if self.session.is_none() {
            return match command {
                Some(FieldCommand::BeginEdit) => self.activate(),
                Some(FieldCommand::Toggle) => self.toggle(),
                _ => false,
            };
        }
        match command {
            Some(FieldCommand::Cancel) => self.exit(ExitReason::Escape),
            Some(FieldCommand::FocusNext | FieldCommand::FocusPrev) => self.exit(ExitReason::Tab),
            _ => {
                let Some(session) = &mut self.session else {
                    return false;
                };
                let result = session.editor.on_key(key);
                self.apply(result)
            }
        }
    }

    /// Click outside an open field. Free-text editors validate what was
    /// typed before closing.
    pub fn on_dismiss(&mut self) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        if self.validate_on_blur && self.hints().text_like {
            let typed = session.editor.value();
            self.engine.validate(&typed);
        }
        self.exit(ExitReason::Dismiss)
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    pub fn view(&self) -> FieldView {
        let tag = &self.descriptor.type_tag;
        let Some(spec) = TypeRegistry::lookup(tag) else {
            return FieldView::default();
        };
        let editing = self.is_editing();
        let is_bool = *tag == TypeTag::Bool;

        let label = self.descriptor.label.as_ref().map(|text| LabelView {
            text: text.clone(),
            glyph: tag.glyph(),
            has_error: self.engine.has_error(),
            required: self.descriptor.config.required,
        });
        let display = (!is_bool && (!editing || spec.hints.display_while_editing))
            .then(|| (spec.format)(&self.descriptor.value, &self.descriptor.options));
        let error = (!self.descriptor.config.inline && self.engine.has_error())
            .then(|| self.engine.error().to_string());
        let focused = self
            .document
            .as_ref()
            .and_then(Document::active)
            .is_some_and(|active| active == self.id);

        FieldView {
            label,
            toggle: is_bool.then(|| Toggle::from_value(&self.descriptor.value).is_checked()),
            display,
            editor: self.session.as_ref().map(|session| session.editor.draw()),
            children: self.children.clone(),
            error,
            inline: self.descriptor.config.inline,
            editing,
            focused,
        }
    }

    pub fn draw(&self) -> DrawOutput {
        self.view().to_draw_output(&self.theme)
    }
}
