//! Inferred semantic type for a column.

use serde::{Deserialize, Serialize};

/// Inferred data type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Email addresses.
    Email,
    /// Boolean-like values (true/false, yes/no, 1/0).
    Boolean,
    /// Date and/or time values.
    Date,
    /// Numeric values (integer or float).
    Numeric,
    /// Absolute URLs.
    Url,
    /// Free text.
    Text,
    /// No non-null values to classify.
    Unknown,
}

impl ValueType {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ValueType::Email => "Email",
            ValueType::Boolean => "Boolean",
            ValueType::Date => "Date",
            ValueType::Numeric => "Numeric",
            ValueType::Url => "URL",
            ValueType::Text => "Text",
            ValueType::Unknown => "Unknown",
        }
    }
}

impl Default for ValueType {
    fn default() -> Self {
        ValueType::Unknown
    }
}
