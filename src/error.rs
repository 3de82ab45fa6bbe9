//! Error types for program loading and proof verification.

use std::fmt;

use crate::diagnostic::{Diagnostic, DiagnosticCode, SourceLocation, first_line};
use crate::matcher::Bindings;
use crate::term::Term;

/// Which side of an equation a term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The left-hand side.
    Lhs,
    /// The right-hand side.
    Rhs,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lhs => "LHS",
            Self::Rhs => "RHS",
        })
    }
}

/// The two halves of an induction proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InductionCase {
    /// The variable replaced by `0`.
    Base,
    /// The variable replaced by its successor.
    Step,
}

impl fmt::Display for InductionCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Base => "base",
            Self::Step => "step",
        })
    }
}

/// The terms involved in a failed match, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// The term that failed to match.
    pub term: Term,
    /// The pattern it was matched against.
    pub pattern: Term,
    /// The claimed result of the rewrite, for target mismatches.
    pub target: Option<Term>,
    /// The bindings collected before the failure.
    pub bindings: Bindings,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expression: {}; pattern: {}", self.term, self.pattern)?;
        if let Some(target) = &self.target {
            write!(f, "; target: {target}")?;
        }
        write!(f, "; bindings: {}", self.bindings)
    }
}

/// Reasons a declaration or one of its proof steps is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ProofError {
    /// Two subterms in different branches of a declared side are marked.
    #[error("{side} marks subterms in two different branches: {term}")]
    Structural {
        /// The offending side.
        side: Side,
        /// The side as declared.
        term: Box<Term>,
    },

    /// A definition or theorem reuses a registered name.
    #[error("duplicate rule name '{name}'")]
    DuplicateRuleName {
        /// The reused name.
        name: String,
    },

    /// A step cites a rule that is not registered.
    #[error("there is no rule named '{name}'")]
    UnknownRule {
        /// The cited name.
        name: String,
    },

    /// The focused subterm does not match the rule's source side.
    #[error("expression doesn't match {rule}: {mismatch}")]
    PatternMismatch {
        /// The rule that was applied.
        rule: String,
        /// Focus, source pattern, and bindings.
        mismatch: Box<Mismatch>,
    },

    /// The rewritten term does not match the step's target.
    #[error("transformed expression doesn't match target by {rule}: {mismatch}")]
    TargetMismatch {
        /// The rule that was applied.
        rule: String,
        /// Whole term, destination pattern, target, and bindings.
        mismatch: Box<Mismatch>,
    },

    /// A chain does not end at the claimed right-hand side.
    #[error("transformed expression {term} is not the right-hand side {goal}")]
    GoalMismatch {
        /// The last term of the chain.
        term: Box<Term>,
        /// The right-hand side it should equal.
        goal: Box<Term>,
    },

    /// An explicit start term differs from the left-hand side.
    #[error("starting expression {start} does not equal the left-hand side {lhs}")]
    StartMismatch {
        /// The explicit start term.
        start: Box<Term>,
        /// The left-hand side of the goal.
        lhs: Box<Term>,
    },

    /// The induction hypothesis is cited outside an induction step.
    #[error("the induction hypothesis can only be used in the step case of an induction proof")]
    HypothesisOutOfScope,

    /// Induction over a name that is not a declared parameter.
    #[error("induction over {var} not possible: it is not a parameter")]
    InductionOverFreeVariable {
        /// The requested induction variable.
        var: String,
    },

    /// A proof term marks more than one subterm.
    #[error("more than one subexpression marked: {term}")]
    MultipleMarks {
        /// The ambiguous term.
        term: Box<Term>,
    },

    /// A step without an explicit target is followed by more steps.
    #[error("a step without an explicit target must be the last step of its chain")]
    UntargetedStep,

    /// Attributes a failure to one step of a chain.
    #[error("step {position}: {source}")]
    Step {
        /// 1-based position of the step in its chain.
        position: usize,
        /// Where the step was written, when known.
        origin: Option<SourceLocation>,
        /// The underlying failure.
        source: Box<ProofError>,
    },

    /// Attributes a failure to one case of an induction proof.
    #[error("{case} case: {source}")]
    Case {
        /// The failing case.
        case: InductionCase,
        /// The underlying failure.
        source: Box<ProofError>,
    },
}

impl ProofError {
    /// Returns the failure beneath any step or case context.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Step { source, .. } | Self::Case { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns the innermost step location recorded for this failure.
    #[must_use]
    pub fn origin(&self) -> Option<&SourceLocation> {
        match self {
            Self::Step { origin, source, .. } => source.origin().or(origin.as_ref()),
            Self::Case { source, .. } => source.origin(),
            _ => None,
        }
    }

    /// Returns the stable diagnostic code of the root cause.
    #[must_use]
    pub fn code(&self) -> DiagnosticCode {
        match self.root_cause() {
            Self::Structural { .. } => DiagnosticCode::Structural,
            Self::DuplicateRuleName { .. } => DiagnosticCode::DuplicateRuleName,
            Self::UnknownRule { .. } => DiagnosticCode::UnknownRule,
            Self::PatternMismatch { .. } => DiagnosticCode::PatternMismatch,
            Self::TargetMismatch { .. } => DiagnosticCode::TargetMismatch,
            Self::GoalMismatch { .. } => DiagnosticCode::GoalMismatch,
            Self::StartMismatch { .. } => DiagnosticCode::StartMismatch,
            Self::HypothesisOutOfScope | Self::InductionOverFreeVariable { .. } => {
                DiagnosticCode::InductionScope
            }
            Self::MultipleMarks { .. } => DiagnosticCode::MultipleMarks,
            Self::UntargetedStep => DiagnosticCode::UntargetedStep,
            // root_cause never returns a wrapper
            Self::Step { .. } | Self::Case { .. } => DiagnosticCode::ValidationFailure,
        }
    }

    pub(crate) fn at_step(self, position: usize, origin: Option<&SourceLocation>) -> Self {
        Self::Step {
            position,
            origin: origin.cloned(),
            source: Box::new(self),
        }
    }

    pub(crate) fn in_case(self, case: InductionCase) -> Self {
        Self::Case {
            case,
            source: Box::new(self),
        }
    }
}

/// A declaration rejected by the verifier.
#[derive(Debug, thiserror::Error)]
#[error("{declaration}: {kind}")]
pub struct VerifyError {
    /// The rejected declaration, e.g. `theorem add_x_zero`.
    pub declaration: String,
    /// Where the declaration was written, when known.
    pub origin: Option<SourceLocation>,
    /// Why it was rejected.
    #[source]
    pub kind: ProofError,
}

impl VerifyError {
    /// Returns the structured diagnostic for this failure.
    ///
    /// The location is the failing step's when known, else the
    /// declaration's.
    #[must_use]
    pub fn diagnostic(&self) -> Diagnostic {
        Diagnostic {
            code: self.kind.code(),
            location: self.kind.origin().or(self.origin.as_ref()).cloned(),
            message: first_line(&format!("{}: {}", self.declaration, self.kind)),
        }
    }
}

/// Errors that can occur when loading program documents.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// YAML deserialization failed (malformed YAML or an unexpected document shape).
    #[error("YAML deserialization failed: {message}")]
    Deserialize {
        /// The deserializer's message.
        message: String,
        /// Structured diagnostic with source location, when available.
        diagnostic: Option<Box<Diagnostic>>,
    },

    /// An identifier failed lexical or reserved-word validation.
    #[error("invalid identifier '{identifier}': {reason}")]
    InvalidIdentifier {
        /// The identifier string that failed validation.
        identifier: String,
        /// A human-readable explanation of why the identifier is invalid.
        reason: String,
    },

    /// A structural constraint was violated after deserialization.
    #[error("validation failed for {declaration}: {reason}")]
    ValidationFailed {
        /// The declaration that failed validation.
        declaration: String,
        /// A human-readable explanation of the violation.
        reason: String,
        /// Structured diagnostic with source location, when available.
        diagnostic: Option<Box<Diagnostic>>,
    },
}

impl DocumentError {
    /// Returns the structured diagnostic attached to this error.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Deserialize { diagnostic, .. } | Self::ValidationFailed { diagnostic, .. } => {
                diagnostic.as_deref()
            }
            Self::InvalidIdentifier { .. } => None,
        }
    }
}
