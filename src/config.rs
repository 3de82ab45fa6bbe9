//! Verifier configuration.
//!
//! Every option defaults to its strict setting, so an empty options
//! document (or [`VerifyOptions::default`]) rejects ambiguous focus and
//! stops at the first failure.

use serde::Deserialize;

/// What the driver does after a declaration fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failing declaration.
    #[default]
    Abort,
    /// Record the failure and verify the remaining declarations.
    Continue,
}

/// How a proof step treats a term with more than one mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkPolicy {
    /// Fail the step with a multiple-marks error.
    #[default]
    Reject,
    /// Warn and focus the first mark in pre-order.
    First,
}

/// Options for [`crate::verify_program`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyOptions {
    /// Behaviour after a failed declaration.
    #[serde(default)]
    pub on_failure: FailurePolicy,
    /// Handling of ambiguous focus inside proof chains.
    #[serde(default)]
    pub proof_marks: MarkPolicy,
}
