//! Error types for the buyout engine.
//!
//! The calculation pipeline itself never fails on validated input. Every
//! variant here belongs either to configuration loading or to the input
//! validator that runs before the engine.

use thiserror::Error;

/// The main error type for the buyout engine.
///
/// # Example
///
/// ```
/// use buyout_engine::error::EngineError;
///
/// let error = EngineError::MissingRequiredField {
///     field: "customBuyoutAmount".to_string(),
/// };
/// assert_eq!(error.to_string(), "Missing required field: customBuyoutAmount");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No configuration version covers the requested data year.
    #[error("No calculator configuration available for data year {year}")]
    ConfigVersionNotFound {
        /// The requested data year.
        year: i32,
    },

    /// A field required by the chosen options was not supplied.
    #[error("Missing required field: {field}")]
    MissingRequiredField {
        /// The wire name of the missing field.
        field: String,
    },

    /// A numeric field fell outside its allowed range.
    #[error("Field '{field}' is out of range: {message}")]
    OutOfRange {
        /// The wire name of the offending field.
        field: String,
        /// A description of the allowed range.
        message: String,
    },

    /// An enum token was not one of the recognised values.
    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidEnum {
        /// The wire name of the offending field.
        field: String,
        /// The token that was supplied.
        value: String,
    },

    /// A string field was present but malformed.
    #[error("Field '{field}' is invalid: {message}")]
    InvalidFormat {
        /// The wire name of the offending field.
        field: String,
        /// A description of what was wrong.
        message: String,
    },
}

impl EngineError {
    /// Returns the wire field name for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            EngineError::MissingRequiredField { field }
            | EngineError::OutOfRange { field, .. }
            | EngineError::InvalidEnum { field, .. }
            | EngineError::InvalidFormat { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/metadata.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/metadata.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/years/2026.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/years/2026.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_config_version_not_found_displays_year() {
        let error = EngineError::ConfigVersionNotFound { year: 2019 };
        assert_eq!(
            error.to_string(),
            "No calculator configuration available for data year 2019"
        );
    }

    #[test]
    fn test_out_of_range_displays_field_and_message() {
        let error = EngineError::OutOfRange {
            field: "age".to_string(),
            message: "must be at least 18".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Field 'age' is out of range: must be at least 18"
        );
    }

    #[test]
    fn test_invalid_enum_displays_field_and_value() {
        let error = EngineError::InvalidEnum {
            field: "buyoutMode".to_string(),
            value: "12month".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value '12month' for field 'buyoutMode'"
        );
    }

    #[test]
    fn test_field_is_exposed_for_validation_errors_only() {
        let validation = EngineError::MissingRequiredField {
            field: "email".to_string(),
        };
        assert_eq!(validation.field(), Some("email"));

        let config = EngineError::ConfigVersionNotFound { year: 2020 };
        assert_eq!(config.field(), None);
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_field() -> EngineResult<()> {
            Err(EngineError::MissingRequiredField {
                field: "customBuyoutAmount".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_field()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
