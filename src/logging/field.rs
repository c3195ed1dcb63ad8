// Thu Oct 15 2026 - Alex

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(value) => write!(f, "{:?}", value),
            FieldValue::Bool(value) => write!(f, "{}", value),
            FieldValue::I64(value) => write!(f, "{}", value),
            FieldValue::U64(value) => write!(f, "{}", value),
            FieldValue::F64(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::I64(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::U64(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::F64(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogField {
    pub key: String,
    pub value: FieldValue,
}

impl LogField {
    pub fn new(key: &str, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

impl fmt::Display for LogField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
