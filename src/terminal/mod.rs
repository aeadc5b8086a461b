pub mod backend;
pub mod keys;

pub use backend::{Terminal, TerminalEvent};
pub use keys::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    pub col: u16,
    pub row: u16,
}
