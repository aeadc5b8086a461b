pub mod config;
pub mod core;
pub mod field;
pub mod interaction;
pub mod logging;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use crate::core::{descriptor, type_tag, value};

pub use field::{Field, FieldView, TypeRegistry, ValidationEngine};
pub use interaction::{Document, FieldHost, UiEvent};
