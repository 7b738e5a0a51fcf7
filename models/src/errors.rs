// models/src/errors.rs

pub use thiserror::Error;

/// A validation error raised while building or parsing an entity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty or whitespace.
    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),
    /// An invalid date format was provided.
    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),
    /// An appointment status outside the known set.
    #[error("unknown appointment status: {0}")]
    InvalidStatus(String),
    /// An email address without a local part or domain.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Fails with `EmptyField` when `value` is blank.
pub fn require_non_empty(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_blank_field() {
        assert_eq!(
            require_non_empty("username", "   "),
            Err(ValidationError::EmptyField("username"))
        );
    }

    #[test]
    fn should_accept_filled_field() {
        assert!(require_non_empty("username", "alice").is_ok());
    }
}
