//! `eqproof` — a verifier for equational proofs by rewriting.
//!
//! Programs declare rewrite rules (`define`), prove new equalities between
//! symbolic terms by chaining rule applications, optionally by induction
//! (`theorem`), and check closed claims (`example`). The verifier checks a
//! hand-written proof deterministically; it never searches for one.
//!
//! Programs are supplied either as values of the [`Program`] data model or
//! as YAML documents through [`load_program`].

pub mod config;
pub mod diagnostic;
mod document;
pub mod error;
mod identifier;
pub mod matcher;
mod newtypes;
pub mod program;
pub mod proof;
pub mod registry;
pub mod rewrite;
pub mod term;

pub use config::{FailurePolicy, MarkPolicy, VerifyOptions};
pub use document::{load_options, load_program, load_program_with_source};
pub use error::{DocumentError, ProofError, VerifyError};
pub use identifier::validate_identifier;
pub use newtypes::{Param, Params, RuleName, params};
pub use program::{Declaration, Definition, Example, Program, Report, Theorem, Verifier, verify_program};
pub use proof::{Direct, Equation, Proof};
pub use registry::{Rule, RuleRegistry};
pub use rewrite::{Direction, Step, StepKind};
pub use term::{Term, TermKind};
