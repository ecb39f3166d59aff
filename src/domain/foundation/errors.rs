//! Error types for the domain layer.

use thiserror::Error;

/// Errors raised when user input is rejected before it reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Message shown in the domain's error slot.
    ///
    /// An empty query gets the short prompt the dashboard has always shown;
    /// everything else falls back to the error's own description.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::EmptyField { field } if field == "query" => {
                "Please enter a query".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("brand");
        assert_eq!(format!("{}", err), "Field 'brand' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("min_star", 1, 5, 7);
        assert_eq!(
            format!("{}", err),
            "Field 'min_star' must be between 1 and 5, got 7"
        );
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("star_range", "min_star exceeds max_star");
        assert_eq!(
            format!("{}", err),
            "Field 'star_range' has invalid format: min_star exceeds max_star"
        );
    }

    #[test]
    fn empty_query_has_prompt_message() {
        let err = ValidationError::empty_field("query");
        assert_eq!(err.user_message(), "Please enter a query");
    }

    #[test]
    fn other_errors_use_display_as_message() {
        let err = ValidationError::out_of_range("max_star", 1, 5, 0);
        assert_eq!(err.user_message(), err.to_string());
    }
}
