use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Keys a field interprets itself; everything else goes to its editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCommand {
    BeginEdit,
    Cancel,
    FocusNext,
    FocusPrev,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, FieldCommand>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, command: FieldCommand) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    pub fn resolve(&self, event: KeyEvent) -> Option<FieldCommand> {
        self.bindings.get(&KeyBinding::from_event(event)).copied()
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::key(KeyCode::Enter), FieldCommand::BeginEdit);
        self.bind(KeyBinding::key(KeyCode::Esc), FieldCommand::Cancel);
        self.bind(KeyBinding::key(KeyCode::Tab), FieldCommand::FocusNext);
        self.bind(KeyBinding::key(KeyCode::BackTab), FieldCommand::FocusPrev);
        self.bind(
            KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            FieldCommand::FocusPrev,
        );
        self.bind(
            KeyBinding::new(KeyCode::Tab, KeyModifiers::SHIFT),
            FieldCommand::FocusPrev,
        );
        self.bind(KeyBinding::key(KeyCode::Char(' ')), FieldCommand::Toggle);
    }
}

/// Direction of the document's default Tab action, if `key` is a Tab key.
pub fn tab_direction(key: KeyEvent) -> Option<bool> {
    match key.code {
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(false),
        KeyCode::Tab => Some(true),
        KeyCode::BackTab => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldCommand, KeyBinding, KeyBindings, tab_direction};
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn defaults_cover_field_commands() {
        let keys = KeyBindings::new();
        assert_eq!(
            keys.resolve(KeyEvent::plain(KeyCode::Esc)),
            Some(FieldCommand::Cancel)
        );
        assert_eq!(
            keys.resolve(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(FieldCommand::FocusPrev)
        );
        assert_eq!(keys.resolve(KeyEvent::char('a')), None);
    }

    #[test]
    fn unbind_removes_command() {
        let mut keys = KeyBindings::new();
        keys.unbind(&KeyBinding::key(KeyCode::Enter));
        assert_eq!(keys.resolve(KeyEvent::plain(KeyCode::Enter)), None);
    }

    #[test]
    fn tab_direction_reads_shift() {
        assert_eq!(tab_direction(KeyEvent::plain(KeyCode::Tab)), Some(true));
        assert_eq!(
            tab_direction(KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT)),
            Some(false)
        );
        assert_eq!(tab_direction(KeyEvent::plain(KeyCode::Enter)), None);
    }
}
