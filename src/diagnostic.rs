//! Structured diagnostics for loading and verification failures.
//!
//! This module defines the stable machine-readable payload that callers
//! format for users. The library itself performs no I/O.

use std::fmt;

/// Stable diagnostic classification codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// YAML deserialization or parse failure.
    ParseFailure,
    /// Post-deserialization document validation failure.
    ValidationFailure,
    /// Marks in two sibling branches of a declared equation.
    Structural,
    /// A definition or theorem reuses a registered name.
    DuplicateRuleName,
    /// A step cites a rule that is not registered.
    UnknownRule,
    /// The focused subterm does not match the rule's source side.
    PatternMismatch,
    /// The rewritten term does not match the step's target.
    TargetMismatch,
    /// A chain does not end at the claimed right-hand side.
    GoalMismatch,
    /// An explicit start term differs from the left-hand side.
    StartMismatch,
    /// The induction hypothesis or induction variable is out of scope.
    InductionScope,
    /// A proof term marks more than one subterm.
    MultipleMarks,
    /// A step without an explicit target is followed by more steps.
    UntargetedStep,
}

impl DiagnosticCode {
    /// Returns the stable, machine-readable code string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParseFailure => "document.parse_failure",
            Self::ValidationFailure => "document.validation_failure",
            Self::Structural => "proof.structural",
            Self::DuplicateRuleName => "proof.duplicate_rule_name",
            Self::UnknownRule => "proof.unknown_rule",
            Self::PatternMismatch => "proof.pattern_mismatch",
            Self::TargetMismatch => "proof.target_mismatch",
            Self::GoalMismatch => "proof.goal_mismatch",
            Self::StartMismatch => "proof.start_mismatch",
            Self::InductionScope => "proof.induction_scope",
            Self::MultipleMarks => "proof.multiple_marks",
            Self::UntargetedStep => "proof.untargeted_step",
        }
    }
}

/// Source location attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source file or source identifier.
    pub source: String,
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column number.
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

/// Structured diagnostic payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Stable diagnostic code for programmatic handling.
    pub code: DiagnosticCode,
    /// Primary source location, when the failing item came from a document.
    pub location: Option<SourceLocation>,
    /// Deterministic human-readable fallback message.
    pub message: String,
}

impl Diagnostic {
    /// Renders the diagnostic into a deterministic single-line format suitable
    /// for snapshot tests.
    ///
    ///     use eqproof::diagnostic::{Diagnostic, DiagnosticCode};
    ///
    ///     let d = Diagnostic {
    ///         code: DiagnosticCode::UnknownRule,
    ///         location: None,
    ///         message: "there is no rule named 'foo'".to_owned(),
    ///     };
    ///     assert_eq!(
    ///         d.render(),
    ///         "proof.unknown_rule | <unknown> | there is no rule named 'foo'"
    ///     );
    #[must_use]
    pub fn render(&self) -> String {
        let location = self
            .location
            .as_ref()
            .map_or_else(|| "<unknown>".to_owned(), ToString::to_string);
        format!("{} | {} | {}", self.code.as_str(), location, self.message)
    }
}

/// Returns the first line of `message`.
pub(crate) fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or(message).to_owned()
}
