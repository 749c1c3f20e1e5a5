//! Field values and the serialized field mapping.
//!
//! A model serializes to a flat [`Mapping`] from field name to [`Value`].
//! Values are untagged so the mapping reads and writes as a plain JSON
//! object.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Flat field mapping produced by `to_mapping` and consumed by reconstruction.
pub type Mapping = BTreeMap<String, Value>;

/// A single field value.
///
/// # Examples
///
/// ```
/// use hbnb_models::Value;
///
/// let name = Value::from("San Francisco");
/// assert_eq!(name.as_str(), Some("San Francisco"));
/// assert_eq!(Value::from(3).type_name(), "int");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer within `i64` range.
    Int(i64),
    /// Integer above `i64::MAX`.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Text.
    String(String),
    /// Arrays and objects, carried through without interpretation.
    Structured(serde_json::Value),
}

impl Value {
    /// Returns true for `Null`.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true for `String`.
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// The boolean, if this is one.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The integer, if this is one that fits `i64`.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The integer, if this is a non-negative one.
    #[allow(clippy::cast_sign_loss)]
    pub const fn as_uint(&self) -> Option<u64> {
        match self {
            Self::UInt(v) => Some(*v),
            Self::Int(v) if *v >= 0 => Some(*v as u64),
            _ => None,
        }
    }

    /// The number as a float, widening integers.
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::UInt(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// The text, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes the value, returning the string if it is one.
    pub fn into_string(self) -> Result<String, Self> {
        match self {
            Self::String(v) => Ok(v),
            other => Err(other),
        }
    }

    /// Returns a human-readable type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Structured(_) => "structured",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Structured(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Self::UInt(v), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    n.as_f64()
                        .map_or(Self::Structured(serde_json::Value::Number(n)), Self::Float)
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            other => Self::Structured(other),
        }
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// Renders a mapping as `{"key": value, ...}` in key order.
pub(crate) fn fmt_mapping(f: &mut fmt::Formatter<'_>, mapping: &Mapping) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, value)) in mapping.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key:?}: {value}")?;
    }
    f.write_str("}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(42i64).as_int(), Some(42));
        assert_eq!(Value::from(7).as_float(), Some(7.0));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert!(Value::default().is_null());
        assert!(Value::from(1.5).as_str().is_none());
    }

    #[test]
    fn test_into_string() {
        assert_eq!(Value::from("abc").into_string(), Ok("abc".to_string()));
        assert_eq!(Value::from(1).into_string(), Err(Value::Int(1)));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::String("a".to_string()));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(format!("{}", Value::from("Paris")), "\"Paris\"");
        assert_eq!(format!("{}", Value::from(3)), "3");
        assert_eq!(format!("{}", Value::Null), "null");
    }

    #[test]
    fn test_mapping_reads_flat_json() {
        let mapping: Mapping = serde_json::from_str(
            r#"{"name": "Napa", "rooms": 3, "price": 12.5, "open": true, "tags": ["a"], "note": null}"#,
        )
        .unwrap();
        assert_eq!(mapping["name"], Value::from("Napa"));
        assert_eq!(mapping["rooms"], Value::Int(3));
        assert_eq!(mapping["price"], Value::Float(12.5));
        assert_eq!(mapping["open"], Value::Bool(true));
        assert_eq!(mapping["tags"], Value::Structured(serde_json::json!(["a"])));
        assert!(mapping["note"].is_null());
    }

    #[test]
    fn test_mapping_writes_flat_json() {
        let mut mapping = Mapping::new();
        mapping.insert("name".to_string(), Value::from("Napa"));
        mapping.insert("rooms".to_string(), Value::from(3));
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"name":"Napa","rooms":3}"#);
    }

    #[test]
    fn test_integers_above_i64_stay_integers() {
        let json = r#"{"big": 18446744073709551615, "small": -3}"#;
        let mapping: Mapping = serde_json::from_str(json).unwrap();
        assert_eq!(mapping["big"], Value::UInt(u64::MAX));
        assert_eq!(mapping["small"], Value::Int(-3));
        assert_eq!(
            serde_json::to_string(&mapping).unwrap(),
            r#"{"big":18446744073709551615,"small":-3}"#
        );
    }

    #[test]
    fn test_from_u64_prefers_int() {
        assert_eq!(Value::from(7u64), Value::Int(7));
        assert_eq!(Value::from(u64::MAX), Value::UInt(u64::MAX));
        assert_eq!(Value::from(u64::MAX).as_uint(), Some(u64::MAX));
        assert_eq!(Value::from(serde_json::json!(u64::MAX)), Value::UInt(u64::MAX));
    }

    #[test]
    fn test_compares_with_str() {
        assert_eq!(Value::from("Reno"), "Reno");
        assert_ne!(Value::from(5), "5");
    }

    #[test]
    fn test_from_json_value() {
        assert_eq!(Value::from(serde_json::json!(5)), Value::Int(5));
        assert_eq!(Value::from(serde_json::json!(0.5)), Value::Float(0.5));
        assert_eq!(
            Value::from(serde_json::json!({"k": 1})),
            Value::Structured(serde_json::json!({"k": 1}))
        );
    }

    #[test]
    fn test_value_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from(1.0).type_name(), "float");
        assert_eq!(Value::from("s").type_name(), "string");
    }
}
