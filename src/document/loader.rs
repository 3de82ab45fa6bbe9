//! Multi-document program loading.
//!
//! Provides [`load_program`], which deserializes a stream of YAML documents
//! into a [`Program`], one declaration per document, then validates and
//! lowers each declaration in order.

use super::raw::RawDeclaration;
use super::validate::{Invalid, location_for_source, lower_declaration};
use crate::config::VerifyOptions;
use crate::diagnostic::{Diagnostic, DiagnosticCode, first_line};
use crate::error::DocumentError;
use crate::program::Program;

/// Synthetic source identifier used by [`load_program`].
const INLINE_SOURCE: &str = "<inline>";

/// Loads a program from a YAML string.
///
/// Each document separated by `---` holds one declaration. Documents are
/// deserialized with strict unknown-key rejection; rule names and params
/// are validated as identifiers during deserialization. Structural
/// constraints, such as a theorem carrying a proof or a step naming
/// exactly one justification, are checked afterwards.
///
/// # Errors
///
/// Returns [`DocumentError::Deserialize`] if the YAML is malformed, does
/// not match the document shape, or contains invalid identifiers.
/// Returns [`DocumentError::ValidationFailed`] if a structural constraint
/// is violated.
///
/// # Examples
///
///     use eqproof::{VerifyOptions, load_program, verify_program};
///
///     let yaml = r"
///     define: add_zero
///     params: [b]
///     lhs: [add, 0, b]
///     rhs: b
///     ---
///     example: two plus zero
///     lhs: [add, 0, 2]
///     rhs: 2
///     proof:
///       steps:
///         - by: add_zero
///     ";
///     let program = load_program(yaml).unwrap();
///     assert_eq!(program.declarations.len(), 2);
///     assert!(verify_program(&program, &VerifyOptions::default()).is_success());
pub fn load_program(input: &str) -> Result<Program, DocumentError> {
    load_program_with_source(INLINE_SOURCE, input)
}

/// Loads a program from YAML and records diagnostics against an explicit
/// source identifier.
///
/// This function behaves like [`load_program`] but associates parser and
/// validator diagnostics, and the origins of declarations and steps, with
/// `source`.
///
/// # Errors
///
/// Returns [`DocumentError::Deserialize`] when YAML parsing or
/// deserialization fails and [`DocumentError::ValidationFailed`] when
/// structural validation fails.
pub fn load_program_with_source(source: &str, input: &str) -> Result<Program, DocumentError> {
    let raw_docs: Vec<RawDeclaration> = serde_saphyr::from_multiple(input)
        .map_err(|error| deserialize_error(source, &error))?;

    let mut declarations = Vec::with_capacity(raw_docs.len());
    for (index, raw_doc) in raw_docs.iter().enumerate() {
        let declaration = lower_declaration(raw_doc, source)
            .map_err(|invalid| validation_error(source, raw_doc.title(index), invalid))?;
        log::debug!("loaded {} from {source}", declaration.title());
        declarations.push(declaration);
    }

    Ok(Program { declarations })
}

/// Loads verification options from a YAML mapping.
///
/// Unknown keys are rejected; absent keys take their defaults.
///
///     use eqproof::{FailurePolicy, MarkPolicy, load_options};
///
///     let options = load_options("on_failure: continue\nproof_marks: first\n").unwrap();
///     assert_eq!(options.on_failure, FailurePolicy::Continue);
///     assert_eq!(options.proof_marks, MarkPolicy::First);
///
/// # Errors
///
/// Returns [`DocumentError::Deserialize`] if the YAML is malformed or names
/// an unknown option or value.
pub fn load_options(input: &str) -> Result<VerifyOptions, DocumentError> {
    if input.trim().is_empty() {
        return Ok(VerifyOptions::default());
    }
    serde_saphyr::from_str(input).map_err(|error| deserialize_error(INLINE_SOURCE, &error))
}

fn deserialize_error(source: &str, error: &serde_saphyr::Error) -> DocumentError {
    let message = error.to_string();
    let diagnostic = error.location().map(|location| {
        Box::new(Diagnostic {
            code: DiagnosticCode::ParseFailure,
            location: Some(location_for_source(source, location)),
            message: first_line(&message),
        })
    });
    DocumentError::Deserialize {
        message,
        diagnostic,
    }
}

fn validation_error(source: &str, declaration: String, invalid: Invalid) -> DocumentError {
    let diagnostic = Diagnostic {
        code: DiagnosticCode::ValidationFailure,
        location: invalid
            .location
            .map(|location| location_for_source(source, location)),
        message: invalid.reason.clone(),
    };
    DocumentError::ValidationFailed {
        declaration,
        reason: invalid.reason,
        diagnostic: Some(Box::new(diagnostic)),
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
