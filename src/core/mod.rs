pub mod descriptor;
pub mod type_tag;
pub mod value;

use std::borrow::Borrow;
use std::fmt;

/// Identifier of an element in the event surface: a field container, a row,
/// or a part inside an open editor (`option:2`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Splits `kind:index` part ids used by list-like editors.
    pub fn indexed_part(&self, kind: &str) -> Option<usize> {
        let rest = self.0.strip_prefix(kind)?.strip_prefix(':')?;
        rest.parse().ok()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&NodeId> for NodeId {
    fn from(value: &NodeId) -> Self {
        value.clone()
    }
}

/// Builds a root-to-target element path from string ids.
pub fn path<I, S>(ids: I) -> Vec<NodeId>
where
    I: IntoIterator<Item = S>,
    S: Into<NodeId>,
{
    ids.into_iter().map(Into::into).collect()
}
