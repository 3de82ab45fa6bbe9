//! Identifier validation for rule names, parameters, and symbols.
//!
//! Identifiers must match the ASCII pattern `^[A-Za-z_][A-Za-z0-9_]*$` and
//! must not be one of the proof language's reserved words.

use crate::error::DocumentError;

/// Words the proof language reserves for its own syntax.
const RESERVED_WORDS: &[&str] = &[
    "define",
    "theorem",
    "example",
    "proof",
    "induction",
    "base",
    "step",
    "todo",
    "by",
    "rev",
];

/// Validates that a string is a legal identifier.
///
/// # Errors
///
/// Returns [`DocumentError::InvalidIdentifier`] if the string is empty,
/// does not match the identifier pattern, or is a reserved word.
///
/// # Examples
///
///     use eqproof::validate_identifier;
///
///     assert!(validate_identifier("add_zero").is_ok());
///     assert!(validate_identifier("_x1").is_ok());
///     assert!(validate_identifier("induction").is_err());
///     assert!(validate_identifier("2x").is_err());
pub fn validate_identifier(s: &str) -> Result<(), DocumentError> {
    if s.is_empty() {
        return Err(DocumentError::InvalidIdentifier {
            identifier: s.to_owned(),
            reason: "identifier must not be empty".to_owned(),
        });
    }

    if !is_valid_identifier_pattern(s) {
        return Err(DocumentError::InvalidIdentifier {
            identifier: s.to_owned(),
            reason: concat!(
                "must match the pattern ",
                "^[A-Za-z_][A-Za-z0-9_]*$ ",
                "(ASCII letters, digits, and underscores; ",
                "must not start with a digit)"
            )
            .to_owned(),
        });
    }

    if RESERVED_WORDS.contains(&s) {
        return Err(DocumentError::InvalidIdentifier {
            identifier: s.to_owned(),
            reason: "this is a reserved word of the proof language".to_owned(),
        });
    }

    Ok(())
}

/// Returns `true` if the string matches `^[A-Za-z_][A-Za-z0-9_]*$`.
fn is_valid_identifier_pattern(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() && first != '_' {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
