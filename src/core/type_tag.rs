use serde::{Deserialize, Serialize};
use std::fmt;

/// Data type of a field column. Selects formatting, the editor widget and
/// validation hints through the type registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeTag {
    Text,
    Number,
    Password,
    Email,
    Url,
    Csv,
    Select,
    Date,
    Relation,
    Json,
    Bool,
    /// System-assigned column (creator/owner); display only.
    Creator,
    /// Any tag this crate does not know. Kept verbatim for diagnostics.
    Unknown(String),
}

impl TypeTag {
    pub const KNOWN: [TypeTag; 12] = [
        TypeTag::Text,
        TypeTag::Number,
        TypeTag::Password,
        TypeTag::Email,
        TypeTag::Url,
        TypeTag::Csv,
        TypeTag::Select,
        TypeTag::Date,
        TypeTag::Relation,
        TypeTag::Json,
        TypeTag::Bool,
        TypeTag::Creator,
    ];

    pub fn parse(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "number" => Self::Number,
            "password" => Self::Password,
            "email" => Self::Email,
            "url" => Self::Url,
            "csv" => Self::Csv,
            "select" => Self::Select,
            "date" => Self::Date,
            "relation" => Self::Relation,
            "json" => Self::Json,
            "bool" => Self::Bool,
            "creator" => Self::Creator,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Password => "password",
            Self::Email => "email",
            Self::Url => "url",
            Self::Csv => "csv",
            Self::Select => "select",
            Self::Date => "date",
            Self::Relation => "relation",
            Self::Json => "json",
            Self::Bool => "bool",
            Self::Creator => "creator",
            Self::Unknown(tag) => tag.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Short marker drawn in front of the label.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Text => "T",
            Self::Number => "#",
            Self::Password => "*",
            Self::Email => "@",
            Self::Url => "~",
            Self::Csv => ",",
            Self::Select => "≡",
            Self::Date => "◷",
            Self::Relation => "⇄",
            Self::Json => "{}",
            Self::Bool => "✓",
            Self::Creator => "◉",
            Self::Unknown(_) => "?",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TypeTag {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for TypeTag {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<TypeTag> for String {
    fn from(value: TypeTag) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::TypeTag;

    #[test]
    fn known_tags_round_trip_through_strings() {
        for tag in TypeTag::KNOWN {
            assert_eq!(TypeTag::parse(tag.as_str()), tag);
            assert!(tag.is_known());
        }
    }

    #[test]
    fn unknown_tags_keep_their_name() {
        let tag: TypeTag = serde_json::from_str("\"geo\"").expect("tag");
        assert_eq!(tag, TypeTag::Unknown("geo".into()));
        assert_eq!(tag.as_str(), "geo");
        assert_eq!(serde_json::to_string(&tag).expect("json"), "\"geo\"");
    }
}
