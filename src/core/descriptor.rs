use crate::core::type_tag::TypeTag;
use crate::core::value::Value;
use serde::{Deserialize, Serialize};

/// Per-column flags. `required` only adds a marker and is visible to
/// validators; it never blocks rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    pub required: bool,
    pub inline: bool,
    pub prevent_spaces: bool,
    /// Related table for `relation` columns.
    pub table_id: Option<String>,
}

impl FieldConfig {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    pub fn with_prevent_spaces(mut self, prevent_spaces: bool) -> Self {
        self.prevent_spaces = prevent_spaces;
        self
    }

    pub fn with_table_id(mut self, table_id: impl Into<String>) -> Self {
        self.table_id = Some(table_id.into());
        self
    }
}

/// One selectable entry. Entries that are neither a `{val, label}` pair nor a
/// plain value deserialize as `Raw` and are shown as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionEntry {
    Labeled { val: Value, label: String },
    Raw(Value),
}

impl OptionEntry {
    pub fn labeled(val: impl Into<Value>, label: impl Into<String>) -> Self {
        Self::Labeled {
            val: val.into(),
            label: label.into(),
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            Self::Labeled { val, .. } => val,
            Self::Raw(val) => val,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Labeled { label, .. } => label.clone(),
            Self::Raw(val) => val.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(Vec<OptionEntry>);

impl OptionSet {
    pub fn new(entries: Vec<OptionEntry>) -> Self {
        Self(entries)
    }

    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self(
            values
                .into_iter()
                .map(|value| OptionEntry::Raw(value.into()))
                .collect(),
        )
    }

    pub fn labeled<I, V, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<Value>,
        L: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(val, label)| OptionEntry::labeled(val, label))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OptionEntry> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionEntry> {
        self.0.iter()
    }

    pub fn position(&self, value: &Value) -> Option<usize> {
        self.0.iter().position(|entry| entry.value() == value)
    }

    /// Label for `value`, falling back to the raw value when no entry matches.
    pub fn display_label(&self, value: &Value) -> String {
        match self.position(value).and_then(|idx| self.0.get(idx)) {
            Some(entry) => entry.label(),
            None => value.to_string(),
        }
    }
}

/// Everything the caller hands a field per render. Replaced wholesale on every
/// value change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub config: FieldConfig,
    #[serde(default)]
    pub options: OptionSet,
}

impl FieldDescriptor {
    pub fn new(type_tag: TypeTag, value: impl Into<Value>) -> Self {
        Self {
            label: None,
            type_tag,
            value: value.into(),
            config: FieldConfig::default(),
            options: OptionSet::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_options(mut self, options: OptionSet) -> Self {
        self.options = options;
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldDescriptor, OptionEntry, OptionSet};
    use crate::core::type_tag::TypeTag;
    use crate::core::value::Value;

    #[test]
    fn labels_resolve_with_raw_fallback() {
        let options = OptionSet::labeled([(1, "One"), (2, "Two")]);
        assert_eq!(options.display_label(&Value::from(2)), "Two");
        assert_eq!(options.display_label(&Value::from(3)), "3");
    }

    #[test]
    fn malformed_entries_degrade_to_raw_values() {
        let options: OptionSet =
            serde_json::from_str(r#"[{"val": 1}, {"label": "orphan"}, "plain"]"#).expect("options");
        assert!(matches!(options.get(0), Some(OptionEntry::Raw(Value::Object(_)))));
        assert!(matches!(options.get(2), Some(OptionEntry::Raw(Value::Text(_)))));
        assert_eq!(options.display_label(&Value::from(1)), "1");
        assert_eq!(options.display_label(&Value::from("plain")), "plain");
    }

    #[test]
    fn descriptor_reads_type_key_and_camel_case_config() {
        let descriptor: FieldDescriptor = serde_json::from_str(
            r#"{"label": "Slug", "type": "text", "value": "a", "config": {"preventSpaces": true}}"#,
        )
        .expect("descriptor");
        assert_eq!(descriptor.type_tag, TypeTag::Text);
        assert!(descriptor.config.prevent_spaces);
        assert!(!descriptor.config.required);
        assert!(descriptor.options.is_empty());
    }
}
