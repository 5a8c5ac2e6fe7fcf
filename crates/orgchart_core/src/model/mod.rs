//! Domain model for departments, roles and employees.
//!
//! # Responsibility
//! - Define the records stored in the three organization tables.
//! - Define the joined read projections shown to operators.
//! - Own field-level validation shared by every write path.
//!
//! # Invariants
//! - Identities are store-assigned integers and never reused.
//! - Text fields are stored trimmed and non-blank.

pub mod department;
pub mod employee;
pub mod role;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field-level input problem detected before touching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty after trimming.
    BlankField(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects it when nothing is left.
pub fn normalize_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{normalize_text, ValidationError};

    #[test]
    fn normalize_text_trims_surrounding_whitespace() {
        assert_eq!(normalize_text("name", "  Sales \n").unwrap(), "Sales");
    }

    #[test]
    fn normalize_text_rejects_whitespace_only() {
        let err = normalize_text("title", " \t ").unwrap_err();
        assert_eq!(err, ValidationError::BlankField("title"));
        assert_eq!(err.to_string(), "title must not be blank");
    }
}
