//! Title validation contract for new items.
//!
//! # Responsibility
//! - Reject empty or overlong titles before they reach `TaskListService::add`.
//!
//! # Invariants
//! - Length is counted in `char`s of the trimmed title.
//! - The core service never calls this itself; form boundaries do.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum accepted title length, in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Field-level validation failure for a submitted title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleValidationError {
    /// Title is empty after trimming.
    Required,
    /// Title exceeds `TITLE_MAX_CHARS`.
    TooLong { chars: usize },
}

impl Display for TitleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "Title is required"),
            Self::TooLong { .. } => write!(f, "Title must be less than 100 characters"),
        }
    }
}

impl Error for TitleValidationError {}

/// Validates raw form input and returns the trimmed title.
///
/// # Errors
/// - `Required` when nothing but whitespace was submitted.
/// - `TooLong` when the trimmed title has more than 100 characters.
pub fn validate_title(raw: &str) -> Result<String, TitleValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TitleValidationError::Required);
    }

    let chars = trimmed.chars().count();
    if chars > TITLE_MAX_CHARS {
        return Err(TitleValidationError::TooLong { chars });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{validate_title, TitleValidationError, TITLE_MAX_CHARS};

    #[test]
    fn accepts_boundary_lengths() {
        assert_eq!(validate_title("a").unwrap(), "a");
        let max = "b".repeat(TITLE_MAX_CHARS);
        assert_eq!(validate_title(&max).unwrap(), max);
    }

    #[test]
    fn counts_chars_not_bytes() {
        let accented = "é".repeat(TITLE_MAX_CHARS);
        assert!(validate_title(&accented).is_ok());
    }

    #[test]
    fn messages_match_form_contract() {
        assert_eq!(
            validate_title("   ").unwrap_err().to_string(),
            "Title is required"
        );
        let err = validate_title(&"a".repeat(101)).unwrap_err();
        assert_eq!(err, TitleValidationError::TooLong { chars: 101 });
        assert_eq!(err.to_string(), "Title must be less than 100 characters");
    }
}
