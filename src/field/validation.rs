use crate::core::value::Value;
use crate::widgets::validators::{ValidationError, Validator};
use tracing::debug;

/// Holds the caller's validator and the single current error of a field.
/// Never touches the value it checks.
#[derive(Default)]
pub struct ValidationEngine {
    validator: Option<Validator>,
    error: String,
}

impl ValidationEngine {
    pub fn new(validator: Option<Validator>) -> Self {
        Self {
            validator,
            error: String::new(),
        }
    }

    pub fn set_validator(&mut self, validator: Option<Validator>) {
        self.validator = validator;
    }

    /// Runs the validator without touching the stored error.
    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let Some(validator) = &self.validator else {
            return Ok(());
        };
        match validator(value) {
            Err(message) if !message.is_empty() => Err(message),
            _ => Ok(()),
        }
    }

    /// Validates `value`, storing the message on failure and clearing it on
    /// success.
    pub fn validate(&mut self, value: &Value) -> bool {
        match self.check(value) {
            Ok(()) => {
                self.error.clear();
                true
            }
            Err(message) => {
                debug!(error = %message, "validation failed");
                self.error = message;
                false
            }
        }
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    pub fn clear(&mut self) {
        self.error.clear();
    }
}
