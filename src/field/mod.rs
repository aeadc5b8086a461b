pub mod controller;
pub mod registry;
pub mod validation;
pub mod view;

pub use controller::{EditState, ExitReason, Field};
pub use registry::{DisplayRepr, TypeHints, TypeRegistry, TypeSpec};
pub use validation::ValidationEngine;
pub use view::{FieldView, LabelView};
