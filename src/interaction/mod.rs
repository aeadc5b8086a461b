pub mod document;
pub mod focus;
pub mod host;
pub mod keymap;

pub use document::{Delivery, Document, Listener, ListenerSet, OverlayLease, UiEvent};
pub use focus::FocusOrder;
pub use host::{FieldHost, HostOutcome};
pub use keymap::{FieldCommand, KeyBinding, KeyBindings};
