//! Error types for hbnb-models.
//!
//! Reconstruction either yields a complete model or one of these errors;
//! no partially initialized model is ever handed back.

use thiserror::Error;

/// Errors raised while building, mutating, or dispatching models.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A timestamp string did not match the fixed format.
    #[error("Field '{field}' is not a timestamp in YYYY-MM-DDTHH:MM:SS.ffffff format: {value:?}")]
    MalformedTimestamp {
        /// Offending key.
        field: String,
        /// Offending text.
        value: String,
        /// Parser failure.
        #[source]
        source: chrono::ParseError,
    },

    /// A required key was absent.
    #[error("Required field '{field}' is missing")]
    MissingField {
        /// Absent key.
        field: String,
    },

    /// A timestamp or type tag was not a string.
    #[error("Field '{field}' must be {expected}, got {actual}")]
    InvalidFieldType {
        /// Offending key.
        field: String,
        /// Expected value type.
        expected: &'static str,
        /// Type actually found.
        actual: &'static str,
    },

    /// Assignment to a base-managed key.
    #[error("Field '{field}' is reserved and cannot be assigned")]
    ReservedField {
        /// Reserved key.
        field: String,
    },

    /// The type tag names no registered class.
    #[error("Unknown model class: {name}")]
    UnknownClass {
        /// Tag that was looked up.
        name: String,
    },

    /// JSON text was invalid or not an object.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    /// Creates a missing-field error.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Returns true if a timestamp string failed to parse.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::MalformedTimestamp { .. })
    }

    /// Returns true if a required key was absent from the mapping.
    #[must_use]
    pub const fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }

    /// Returns true if the error names a class the registry does not know.
    #[must_use]
    pub const fn is_unknown_class(&self) -> bool {
        matches!(self, Self::UnknownClass { .. })
    }
}

/// Result type alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = ModelError::missing("updated_at");
        let msg = format!("{err}");
        assert!(msg.contains("updated_at"));
        assert!(err.is_missing_field());
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_malformed_timestamp_keeps_source() {
        let source = chrono::NaiveDateTime::parse_from_str("nope", "%Y").unwrap_err();
        let err = ModelError::MalformedTimestamp {
            field: "created_at".to_string(),
            value: "nope".to_string(),
            source,
        };
        assert!(err.is_parse_error());
        assert!(std::error::Error::source(&err).is_some());
        assert!(format!("{err}").contains("\"nope\""));
    }

    #[test]
    fn test_invalid_field_type_message() {
        let err = ModelError::InvalidFieldType {
            field: "name".to_string(),
            expected: "string",
            actual: "int",
        };
        let msg = format!("{err}");
        assert!(msg.contains("must be string"));
        assert!(msg.contains("got int"));
    }

    #[test]
    fn test_unknown_class() {
        let err = ModelError::UnknownClass {
            name: "Planet".to_string(),
        };
        assert!(err.is_unknown_class());
        assert!(format!("{err}").contains("Planet"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ModelError = json_err.into();
        assert!(matches!(err, ModelError::Json(_)));
    }
}
