//! Direct and induction proofs of an equation.
//!
//! A direct proof is a rewrite chain from the left-hand side to the
//! right-hand side. An induction proof splits the goal into a base case at
//! `0` and a step case at the successor of the induction variable; only the
//! step case may cite the original equation as its induction hypothesis.

use std::fmt;

use crate::config::MarkPolicy;
use crate::error::{InductionCase, ProofError};
use crate::matcher::equals;
use crate::newtypes::Params;
use crate::registry::RuleRegistry;
use crate::rewrite::{ChainContext, Step, verify_chain};
use crate::term::{Term, substitute};

/// An equality `lhs = rhs` to be proved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    /// The left-hand side.
    pub lhs: Term,
    /// The right-hand side.
    pub rhs: Term,
}

impl Equation {
    /// Builds `lhs = rhs`.
    #[must_use]
    pub const fn new(lhs: Term, rhs: Term) -> Self {
        Self { lhs, rhs }
    }

    /// Replaces `var` by `replacement` on both sides.
    #[must_use]
    pub fn substitute(&self, var: &str, replacement: &Term) -> Self {
        Self {
            lhs: substitute(&self.lhs, var, replacement),
            rhs: substitute(&self.rhs, var, replacement),
        }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

/// A rewrite chain, optionally restating where it starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Direct {
    /// An explicit start term; must equal the left-hand side. Marks on it
    /// focus the first step.
    pub start: Option<Term>,
    /// The steps, in order.
    pub steps: Vec<Step>,
}

impl Direct {
    /// A chain that starts at the left-hand side.
    #[must_use]
    pub const fn new(steps: Vec<Step>) -> Self {
        Self { start: None, steps }
    }

    /// Sets an explicit start term.
    #[must_use]
    pub fn starting_at(mut self, start: Term) -> Self {
        self.start = Some(start);
        self
    }
}

/// A proof of a declared equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proof {
    /// A single rewrite chain.
    Direct(Direct),
    /// Induction over one of the declaration's parameters.
    Induction {
        /// The induction variable.
        var: String,
        /// Proof of the equation with `var := 0`.
        base: Direct,
        /// Proof of the equation with `var := (succ var)`.
        step: Direct,
    },
}

impl fmt::Display for Direct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self
            .start
            .as_ref()
            .map_or_else(|| "implied".to_owned(), ToString::to_string);
        writeln!(f, "start: {start}")?;
        for step in &self.steps {
            writeln!(f, "  {step}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(direct) => write!(f, "{direct}"),
            Self::Induction { var, base, step } => {
                writeln!(f, "induction on {var}")?;
                write!(f, "base:\n{base}step:\n{step}")
            }
        }
    }
}

/// Checks `proof` of `goal` against the rules in `registry`.
///
/// `params` are the goal's universally quantified parameters; induction is
/// only possible over one of them.
///
/// # Errors
///
/// Returns the first failure. Induction failures are wrapped with the case
/// they occurred in.
pub fn verify_proof(
    proof: &Proof,
    params: &Params,
    goal: &Equation,
    registry: &RuleRegistry,
    marks: MarkPolicy,
) -> Result<(), ProofError> {
    match proof {
        Proof::Direct(direct) => {
            let ctx = ChainContext {
                registry,
                hypothesis: None,
                marks,
            };
            verify_direct(direct, goal, &ctx)?;
            log::debug!("direct chain verified: {goal}");
            Ok(())
        }
        Proof::Induction { var, base, step } => {
            verify_induction(var, base, step, params, goal, registry, marks)
        }
    }
}

/// Checks a rewrite chain from `goal.lhs` (or the explicit start) to
/// `goal.rhs`.
///
/// # Errors
///
/// Returns [`ProofError::StartMismatch`] for a start term that is not the
/// left-hand side, or the chain's first failure.
pub fn verify_direct(
    direct: &Direct,
    goal: &Equation,
    ctx: &ChainContext<'_>,
) -> Result<(), ProofError> {
    let start = match &direct.start {
        Some(start) if !equals(start, &goal.lhs) => {
            return Err(ProofError::StartMismatch {
                start: Box::new(start.clone()),
                lhs: Box::new(goal.lhs.clone()),
            });
        }
        Some(start) => start,
        None => &goal.lhs,
    };
    verify_chain(start, &direct.steps, &goal.rhs, ctx)
}

fn verify_induction(
    var: &str,
    base: &Direct,
    step: &Direct,
    params: &Params,
    goal: &Equation,
    registry: &RuleRegistry,
    marks: MarkPolicy,
) -> Result<(), ProofError> {
    if !params.contains(var) {
        return Err(ProofError::InductionOverFreeVariable {
            var: var.to_owned(),
        });
    }

    let base_goal = goal.substitute(var, &Term::zero());
    let base_ctx = ChainContext {
        registry,
        hypothesis: None,
        marks,
    };
    verify_direct(base, &base_goal, &base_ctx).map_err(|e| e.in_case(InductionCase::Base))?;
    log::debug!("base case verified: {base_goal}");

    let step_goal = goal.substitute(var, &Term::succ(Term::var(var)));
    let step_ctx = ChainContext {
        registry,
        hypothesis: Some(goal),
        marks,
    };
    verify_direct(step, &step_goal, &step_ctx).map_err(|e| e.in_case(InductionCase::Step))?;
    log::debug!("step case verified: {step_goal}");
    Ok(())
}

#[cfg(test)]
#[path = "proof_tests.rs"]
mod tests;
