pub mod value;

use crate::form::Field;
use std::fmt;

/// Identifier of a node in the form view. Field inputs use the field key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn field(&self) -> Option<Field> {
        Field::from_key(self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<Field> for NodeId {
    fn from(field: Field) -> Self {
        Self(field.key().to_string())
    }
}
