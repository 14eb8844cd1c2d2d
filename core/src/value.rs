//! Runtime values bound to placeholders and read back from rows.

use std::fmt;

use crate::error::{RelqError, Result};

/// A single bound or fetched value.
///
/// Every parameter a relation needs, whatever its static type, is stored as a
/// `Value` in one ordered list.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Boolean(bool),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Renders the value as an SQL literal for connectors without native
    /// parameter binding. Text is single-quoted with embedded quotes doubled.
    pub fn to_literal(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Integer(v) => v.to_string(),
            Value::Real(v) if v.is_finite() => format!("{v:?}"),
            Value::Real(_) => "NULL".to_string(),
            Value::Text(s) => format!("'{}'", s.replace('\'', "''")),
            Value::Boolean(true) => "TRUE".to_string(),
            Value::Boolean(false) => "FALSE".to_string(),
        }
    }

    /// Storage class name, used in mapping errors.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Boolean(_) => "boolean",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Column storage kinds, used by connectors to pick DDL types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SQLKind {
    Integer,
    BigInt,
    Real,
    Text,
    Boolean,
}

/// A Rust type that can live in a column.
pub trait SQLType: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    const KIND: SQLKind;

    fn to_value(&self) -> Value;

    /// Converts a fetched value, yielding `None` for SQL NULL.
    fn from_value(value: Value) -> Result<Option<Self>>;

    fn to_text(&self) -> String;

    fn from_text(text: &str) -> Result<Self>;
}

/// Column types that `sum` and `avg` accept.
pub trait Summable: SQLType {
    /// Result type of `sum` over this column
    type Total: SQLType + Default;
}

/// Column types that `max` and `min` accept.
pub trait Ordered: SQLType {}

fn mismatch<T>(expected: &str, value: &Value) -> Result<T> {
    Err(RelqError::Mapping(format!(
        "expected {expected}, found {} value",
        value.kind_name()
    )))
}

fn parse_error(expected: &str, text: &str) -> RelqError {
    RelqError::Mapping(format!("cannot parse {text:?} as {expected}"))
}

impl SQLType for i32 {
    const KIND: SQLKind = SQLKind::Integer;

    fn to_value(&self) -> Value {
        Value::Integer((*self).into())
    }

    fn from_value(value: Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Integer(v) => i32::try_from(v)
                .map(Some)
                .map_err(|_| RelqError::Mapping(format!("integer {v} out of range for i32"))),
            Value::Boolean(b) => Ok(Some(b.into())),
            other => mismatch("integer", &other),
        }
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self> {
        text.trim().parse().map_err(|_| parse_error("i32", text))
    }
}

impl SQLType for i64 {
    const KIND: SQLKind = SQLKind::BigInt;

    fn to_value(&self) -> Value {
        Value::Integer(*self)
    }

    fn from_value(value: Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Integer(v) => Ok(Some(v)),
            Value::Boolean(b) => Ok(Some(b.into())),
            other => mismatch("integer", &other),
        }
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self> {
        text.trim().parse().map_err(|_| parse_error("i64", text))
    }
}

impl SQLType for f64 {
    const KIND: SQLKind = SQLKind::Real;

    fn to_value(&self) -> Value {
        Value::Real(*self)
    }

    fn from_value(value: Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Real(v) => Ok(Some(v)),
            Value::Integer(v) => Ok(Some(v as f64)),
            other => mismatch("real", &other),
        }
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self> {
        text.trim().parse().map_err(|_| parse_error("f64", text))
    }
}

impl SQLType for String {
    const KIND: SQLKind = SQLKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Text(s) => Ok(Some(s)),
            other => mismatch("text", &other),
        }
    }

    fn to_text(&self) -> String {
        self.clone()
    }

    fn from_text(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }
}

impl SQLType for bool {
    const KIND: SQLKind = SQLKind::Boolean;

    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }

    fn from_value(value: Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Boolean(b) => Ok(Some(b)),
            // SQLite stores booleans as integers
            Value::Integer(v) => Ok(Some(v != 0)),
            other => mismatch("boolean", &other),
        }
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self> {
        match text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(parse_error("bool", text)),
        }
    }
}

impl Summable for i32 {
    type Total = i64;
}

impl Summable for i64 {
    type Total = i64;
}

impl Summable for f64 {
    type Total = f64;
}

impl Ordered for i32 {}
impl Ordered for i64 {}
impl Ordered for f64 {}
impl Ordered for String {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_literal_doubles_quotes() {
        let value = Value::from("O'Brien's");
        assert_eq!(value.to_literal(), "'O''Brien''s'");
    }

    #[test]
    fn injection_attempt_stays_inside_literal() {
        let value = Value::from("x'; DROP TABLE users; --");
        assert_eq!(value.to_literal(), "'x''; DROP TABLE users; --'");
    }

    #[test]
    fn scalar_literals() {
        assert_eq!(Value::Null.to_literal(), "NULL");
        assert_eq!(Value::from(42).to_literal(), "42");
        assert_eq!(Value::from(1.0).to_literal(), "1.0");
        assert_eq!(Value::from(true).to_literal(), "TRUE");
        assert_eq!(Value::from(None::<i64>).to_literal(), "NULL");
    }

    #[test]
    fn integer_narrowing_is_checked() {
        assert_eq!(i32::from_value(Value::Integer(7)).unwrap(), Some(7));
        assert!(i32::from_value(Value::Integer(i64::MAX)).is_err());
        assert!(i32::from_value(Value::Text("7".into())).is_err());
    }

    #[test]
    fn sqlite_booleans_decode_from_integers() {
        assert_eq!(bool::from_value(Value::Integer(1)).unwrap(), Some(true));
        assert_eq!(bool::from_value(Value::Integer(0)).unwrap(), Some(false));
        assert_eq!(bool::from_value(Value::Null).unwrap(), None);
    }

    #[test]
    fn text_round_trip_parsing() {
        assert_eq!(i64::from_text(" 12 ").unwrap(), 12);
        assert!(bool::from_text("yes").is_err());
        assert_eq!(f64::from_text("2.5").unwrap(), 2.5);
    }
}
