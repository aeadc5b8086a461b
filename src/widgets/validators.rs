use crate::core::value::Value;
use regex::Regex;

pub type ValidationError = String;

/// Caller-supplied check. `Err` carries the message shown under the field;
/// an empty message counts as success.
pub type Validator = Box<dyn Fn(&Value) -> Result<(), ValidationError>>;

/// Run a list of validators against `value`, returning the first error.
pub fn run_validators(validators: &[Validator], value: &Value) -> Result<(), ValidationError> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

/// Combines validators; the first failure wins.
pub fn all(validators: Vec<Validator>) -> Validator {
    Box::new(move |value: &Value| run_validators(&validators, value))
}

pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &Value| {
        let blank = match value {
            Value::Text(text) => text.trim().is_empty(),
            other => other.is_empty(),
        };
        if blank { Err(message.clone()) } else { Ok(()) }
    })
}

pub fn min_length(min_len: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &Value| {
        if text_len(value) < min_len {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn max_length(max_len: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &Value| {
        if text_len(value) > max_len {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

/// Matches the text form of the value. Absent values pass; pair with
/// `required` to reject them.
pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Validator, regex::Error> {
    let re = Regex::new(pattern)?;
    let message = message.into();
    Ok(Box::new(move |value: &Value| {
        if value.is_none() {
            return Ok(());
        }
        let text = value.to_string();
        if re.is_match(&text) {
            Ok(())
        } else {
            Err(message.clone())
        }
    }))
}

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$";
const URL_PATTERN: &str = r"^https?://[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*(:\d+)?([/?#]\S*)?$";

pub fn email(message: impl Into<String>) -> Validator {
    text_pattern(EMAIL_PATTERN, message)
}

pub fn url(message: impl Into<String>) -> Validator {
    text_pattern(URL_PATTERN, message)
}

pub fn numeric(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &Value| match value {
        Value::None | Value::Number(_) => Ok(()),
        Value::Text(text) if text.trim().parse::<f64>().is_ok() => Ok(()),
        _ => Err(message.clone()),
    })
}

pub fn custom<F>(check: F, message: impl Into<String>) -> Validator
where
    F: Fn(&Value) -> bool + 'static,
{
    let message = message.into();
    Box::new(move |value: &Value| {
        if check(value) { Ok(()) } else { Err(message.clone()) }
    })
}

fn text_check<F>(check: F, message: impl Into<String>) -> Validator
where
    F: Fn(&str) -> bool + 'static,
{
    let message = message.into();
    Box::new(move |value: &Value| match value {
        Value::None => Ok(()),
        Value::Text(text) if text.is_empty() => Ok(()),
        Value::Text(text) if check(text) => Ok(()),
        _ => Err(message.clone()),
    })
}

/// Built-in text pattern; empty text passes.
fn text_pattern(pattern: &'static str, message: impl Into<String>) -> Validator {
    let re = Regex::new(pattern).expect("built-in pattern compiles");
    text_check(move |text| re.is_match(text), message)
}

fn text_len(value: &Value) -> usize {
    match value {
        Value::None => 0,
        Value::List(items) => items.len(),
        other => other.to_string().chars().count(),
    }
}
