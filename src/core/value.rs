#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Text(String),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Text form of scalar values; `None` maps to no text at all.
    pub fn to_text_scalar(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Text(v) => Some(v.clone()),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
