use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A field value as the caller hands it over. Mirrors the JSON data model;
/// `None` stands for an absent/undefined value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.is_empty(),
            Self::List(v) => v.is_empty(),
            Self::Object(v) => v.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::None => serde_json::Value::Null,
            Self::Bool(v) => serde_json::Value::Bool(*v),
            Self::Number(v) => number_to_json(*v),
            Self::Text(v) => serde_json::Value::String(v.clone()),
            Self::List(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::None,
            serde_json::Value::Bool(v) => Self::Bool(v),
            serde_json::Value::Number(v) => v.as_f64().map(Self::Number).unwrap_or(Self::None),
            serde_json::Value::String(v) => Self::Text(v),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from_json(value)))
                    .collect(),
            ),
        }
    }

    /// Compact JSON text, integral numbers without a fractional part.
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Text(v) => f.write_str(v),
            Self::Number(v) => f.write_str(&format_number(*v)),
            Self::Bool(v) => write!(f, "{v}"),
            Self::List(_) | Self::Object(_) => f.write_str(&self.to_json_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(Value::from).collect())
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER
}

pub fn format_number(value: f64) -> String {
    if is_integral(value) {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

fn number_to_json(value: f64) -> serde_json::Value {
    if is_integral(value) {
        return serde_json::Value::from(value as i64);
    }
    serde_json::Number::from_f64(value)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::Value;
    use indexmap::IndexMap;

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-4.0).to_json_string(), "-4");
    }

    #[test]
    fn json_string_is_compact_and_ordered() {
        let mut map = IndexMap::new();
        map.insert("b".to_string(), Value::Number(1.0));
        map.insert("a".to_string(), Value::List(vec![Value::Bool(true), Value::None]));
        assert_eq!(
            Value::Object(map).to_json_string(),
            r#"{"b":1,"a":[true,null]}"#
        );
    }

    #[test]
    fn parsed_objects_keep_key_order() {
        let json = serde_json::from_str(r#"{"z":1,"a":{"y":true,"b":null}}"#).expect("json");
        let value = Value::from_json(json);
        assert_eq!(value.to_json_string(), r#"{"z":1,"a":{"y":true,"b":null}}"#);
    }

    #[test]
    fn deserializes_untagged_json() {
        let value: Value = serde_json::from_str(r#"["a", 2, null, {"k": false}]"#).expect("json");
        let Value::List(items) = value else {
            panic!("expected list");
        };
        assert_eq!(items[0], Value::Text("a".into()));
        assert_eq!(items[1], Value::Number(2.0));
        assert_eq!(items[2], Value::None);
        assert!(matches!(items[3], Value::Object(_)));
    }

    #[test]
    fn empty_distinguishes_absent_from_false() {
        assert!(Value::None.is_empty());
        assert!(Value::List(Vec::new()).is_empty());
        assert!(!Value::Bool(false).is_empty());
        assert!(!Value::Number(0.0).is_empty());
    }
}
