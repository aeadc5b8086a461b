pub mod date;
pub mod json;
pub mod select;
pub mod static_view;
pub mod text;
pub mod text_edit;
pub mod toggle;
pub mod traits;
pub mod validators;
