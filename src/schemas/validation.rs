use serde::{Deserialize, Deserializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Option<String>,
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "{}: {}", field, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::new(format!("Invalid JSON: {}", err))
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Keeps an explicit `null` apart from an omitted key.
///
/// Use with `#[serde(default, deserialize_with = "nullable")]`: a missing key
/// stays `None`, `null` becomes `Some(None)` and a value `Some(Some(v))`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Unwraps a patched field that may not be cleared.
pub fn required<T>(field: &str, value: Option<Option<T>>) -> Result<Option<T>, ValidationError> {
    match value {
        Some(None) => Err(ValidationError::field(field, "Field may not be null")),
        Some(Some(value)) => Ok(Some(value)),
        None => Ok(None),
    }
}

pub fn validate_noc(field: &str, code: &str) -> Result<(), ValidationError> {
    if code.chars().count() != 3 {
        return Err(ValidationError::field(field, "NOC code must be exactly 3 characters"));
    }
    if code.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::field(field, "NOC code cannot contain whitespace"));
    }
    Ok(())
}

pub fn validate_not_blank(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::field(field, "Field cannot be empty"));
    }
    Ok(())
}

pub fn validate_non_negative(field: &str, value: Option<i32>) -> Result<(), ValidationError> {
    match value {
        Some(v) if v < 0 => Err(ValidationError::field(field, "Value cannot be negative")),
        _ => Ok(()),
    }
}
