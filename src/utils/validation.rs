// Runtime type checks for loosely typed configuration values

use std::fmt;

use serde_json::Value;

use crate::utils::error::{Result, SiteError};

/// Structural type tag of a deserialized configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueType {
    /// Lowercase tag used in messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type tag of a value
pub fn type_of(value: &Value) -> ValueType {
    match value {
        Value::Null => ValueType::Null,
        Value::Bool(_) => ValueType::Boolean,
        Value::Number(_) => ValueType::Number,
        Value::String(_) => ValueType::String,
        Value::Array(_) => ValueType::Array,
        Value::Object(_) => ValueType::Object,
    }
}

pub fn is_string(value: &Value) -> bool {
    type_of(value) == ValueType::String
}

pub fn is_boolean(value: &Value) -> bool {
    type_of(value) == ValueType::Boolean
}

pub fn is_number(value: &Value) -> bool {
    type_of(value) == ValueType::Number
}

pub fn is_object(value: &Value) -> bool {
    type_of(value) == ValueType::Object
}

pub fn is_array(value: &Value) -> bool {
    type_of(value) == ValueType::Array
}

/// Check the type of an optional field.
///
/// An absent field passes. A present field of another type fails with a
/// message naming the field and the expected type.
pub fn if_present_check_type(expected: ValueType, field: &str, value: Option<&Value>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };

    if type_of(value) != expected {
        return Err(SiteError::Validation(format!("{} has to be {}", field, expected)));
    }

    Ok(())
}
