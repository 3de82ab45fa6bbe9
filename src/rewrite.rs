//! Checking rewrite steps and chains of them.
//!
//! A step claims that rewriting the focused subterm of the current term by
//! a rule yields its target. The engine never computes the rewrite; it
//! matches the focus against the rule's source side and then walks the
//! current term and the target in lock-step, requiring the target to match
//! the rule's destination side at the focus and to be unchanged everywhere
//! else.

use std::fmt;

use crate::config::MarkPolicy;
use crate::diagnostic::SourceLocation;
use crate::error::{Mismatch, ProofError};
use crate::matcher::{Bindings, equals, match_pattern};
use crate::newtypes::{Params, RuleName};
use crate::proof::Equation;
use crate::registry::RuleRegistry;
use crate::term::{MarkLayout, Term, TermKind, TermPath, mark_layout};

/// Which way a rule is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Left-hand side to right-hand side.
    #[default]
    Forward,
    /// Right-hand side to left-hand side.
    Reversed,
}

impl Direction {
    /// Returns `(source, dest)` for an equation applied in this direction.
    #[must_use]
    pub const fn orient<'a>(self, lhs: &'a Term, rhs: &'a Term) -> (&'a Term, &'a Term) {
        match self {
            Self::Forward => (lhs, rhs),
            Self::Reversed => (rhs, lhs),
        }
    }
}

/// How a step justifies its rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    /// Apply a registered rule.
    Named {
        /// The cited rule.
        rule: RuleName,
        /// The direction of application.
        direction: Direction,
    },
    /// Apply the equality being proved, in the step case of an induction.
    Induction {
        /// The direction of application.
        direction: Direction,
    },
    /// Accept the step unchecked.
    Todo,
}

/// One link of a rewrite chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The justification.
    pub kind: StepKind,
    /// The term the rewrite lands on. When absent the step must end its
    /// chain and lands on the goal.
    pub target: Option<Term>,
    /// Where the step was written, when known.
    pub origin: Option<SourceLocation>,
}

impl Step {
    /// A forward application of `rule`.
    #[must_use]
    pub const fn by(rule: RuleName) -> Self {
        Self::new(StepKind::Named {
            rule,
            direction: Direction::Forward,
        })
    }

    /// A reversed application of `rule`.
    #[must_use]
    pub const fn by_rev(rule: RuleName) -> Self {
        Self::new(StepKind::Named {
            rule,
            direction: Direction::Reversed,
        })
    }

    /// A forward application of the induction hypothesis.
    #[must_use]
    pub const fn induction() -> Self {
        Self::new(StepKind::Induction {
            direction: Direction::Forward,
        })
    }

    /// A reversed application of the induction hypothesis.
    #[must_use]
    pub const fn induction_rev() -> Self {
        Self::new(StepKind::Induction {
            direction: Direction::Reversed,
        })
    }

    /// An unchecked placeholder.
    #[must_use]
    pub const fn todo() -> Self {
        Self::new(StepKind::Todo)
    }

    /// Sets the term this step lands on.
    #[must_use]
    pub fn to(mut self, target: Term) -> Self {
        self.target = Some(target);
        self
    }

    const fn new(kind: StepKind) -> Self {
        Self {
            kind,
            target: None,
            origin: None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rev = |direction: &Direction| match direction {
            Direction::Forward => "",
            Direction::Reversed => "rev ",
        };
        match &self.kind {
            StepKind::Named { rule, direction } => write!(f, "by {}{rule}", rev(direction))?,
            StepKind::Induction { direction } => write!(f, "by {}induction", rev(direction))?,
            StepKind::Todo => f.write_str("todo")?,
        }
        if let Some(target) = &self.target {
            write!(f, " => {target}")?;
        }
        Ok(())
    }
}

/// A rule oriented for one application.
#[derive(Debug, Clone, Copy)]
pub struct Rewrite<'a> {
    /// Name used in diagnostics.
    pub label: &'a str,
    /// Parameters that may bind while matching.
    pub params: &'a Params,
    /// The side matched at the focus.
    pub source: &'a Term,
    /// The side the target must show at the focus.
    pub dest: &'a Term,
}

/// What a chain may consult besides its own terms.
#[derive(Debug, Clone, Copy)]
pub struct ChainContext<'a> {
    /// Rules registered before the declaration being proved.
    pub registry: &'a RuleRegistry,
    /// The equality being proved, available only in an induction step.
    pub hypothesis: Option<&'a Equation>,
    /// Handling of terms with several marks.
    pub marks: MarkPolicy,
}

/// Checks that rewriting `whole` at `focus` by `rewrite` yields `target`.
///
/// # Errors
///
/// Returns [`ProofError::PatternMismatch`] if the focused subterm does not
/// match the source side, and [`ProofError::TargetMismatch`] if `target`
/// differs from the rewritten term.
pub fn apply_rewrite(
    whole: &Term,
    focus: &TermPath,
    rewrite: &Rewrite<'_>,
    target: &Term,
) -> Result<(), ProofError> {
    let focused = whole.at(focus).unwrap_or(whole);
    let mut bindings = Bindings::new();
    if !match_pattern(focused, rewrite.source, rewrite.params, &mut bindings) {
        return Err(ProofError::PatternMismatch {
            rule: rewrite.label.to_owned(),
            mismatch: Box::new(Mismatch {
                term: focused.clone(),
                pattern: rewrite.source.clone(),
                target: None,
                bindings,
            }),
        });
    }
    if !rewrite_consistent(
        whole,
        focus.indices(),
        rewrite.dest,
        target,
        rewrite.params,
        &mut bindings,
    ) {
        return Err(ProofError::TargetMismatch {
            rule: rewrite.label.to_owned(),
            mismatch: Box::new(Mismatch {
                term: whole.clone(),
                pattern: rewrite.dest.clone(),
                target: Some(target.clone()),
                bindings,
            }),
        });
    }
    Ok(())
}

/// Walks `node` and `target` together along `path`.
///
/// Off the path the two trees must be equal; at its end `target` must match
/// `dest` under the bindings of the source match.
fn rewrite_consistent(
    node: &Term,
    path: &[usize],
    dest: &Term,
    target: &Term,
    params: &Params,
    bindings: &mut Bindings,
) -> bool {
    let Some((&index, rest)) = path.split_first() else {
        return match_pattern(target, dest, params, bindings);
    };
    match (node.kind(), target.kind()) {
        (TermKind::Compound(items), TermKind::Compound(targets)) => {
            items.len() == targets.len()
                && items
                    .iter()
                    .zip(targets)
                    .enumerate()
                    .all(|(i, (item, expected))| {
                        if i == index {
                            rewrite_consistent(item, rest, dest, expected, params, bindings)
                        } else {
                            equals(item, expected)
                        }
                    })
        }
        _ => false,
    }
}

/// Returns the path of the subterm the next step rewrites.
///
/// An unmarked term is focused as a whole.
///
/// # Errors
///
/// Returns [`ProofError::MultipleMarks`] when several subterms are marked
/// and `policy` is [`MarkPolicy::Reject`].
pub fn locate_focus(term: &Term, policy: MarkPolicy) -> Result<TermPath, ProofError> {
    match mark_layout(term) {
        MarkLayout::Unmarked => Ok(TermPath::root()),
        MarkLayout::Single(path) => Ok(path),
        layout => match policy {
            MarkPolicy::Reject => Err(ProofError::MultipleMarks {
                term: Box::new(term.clone()),
            }),
            MarkPolicy::First => {
                log::warn!("more than one subexpression marked, using the first: {term}");
                Ok(layout.first().cloned().unwrap_or_default())
            }
        },
    }
}

/// Checks one step from `current` towards its target (or `goal`).
///
/// # Errors
///
/// Returns the first reason the step is unjustified.
pub fn verify_step(
    current: &Term,
    step: &Step,
    goal: &Term,
    ctx: &ChainContext<'_>,
) -> Result<(), ProofError> {
    let target = step.target.as_ref().unwrap_or(goal);
    match &step.kind {
        StepKind::Todo => {
            log::warn!("accepting unchecked step from {current} to {target}");
            Ok(())
        }
        StepKind::Named { rule, direction } => {
            let found = ctx
                .registry
                .find(rule.as_str())
                .ok_or_else(|| ProofError::UnknownRule {
                    name: rule.to_string(),
                })?;
            let focus = locate_focus(current, ctx.marks)?;
            let (source, dest) = direction.orient(&found.lhs, &found.rhs);
            let rewrite = Rewrite {
                label: found.name.as_str(),
                params: &found.params,
                source,
                dest,
            };
            apply_rewrite(current, &focus, &rewrite, target)
        }
        StepKind::Induction { direction } => {
            let hypothesis = ctx.hypothesis.ok_or(ProofError::HypothesisOutOfScope)?;
            let focus = locate_focus(current, ctx.marks)?;
            let (source, dest) = direction.orient(&hypothesis.lhs, &hypothesis.rhs);
            let fixed = Params::default();
            let rewrite = Rewrite {
                label: "the induction hypothesis",
                params: &fixed,
                source,
                dest,
            };
            apply_rewrite(current, &focus, &rewrite, target)
        }
    }
}

/// Checks a chain of steps leading from `start` to `goal`.
///
/// Each step's target becomes the next step's current term. A step without
/// a target lands on `goal` and must be the last one; otherwise the last
/// target must equal `goal`.
///
/// # Errors
///
/// Returns the first failing step's error, wrapped with its position, or
/// [`ProofError::GoalMismatch`] if the chain stops short of `goal`.
pub fn verify_chain(
    start: &Term,
    steps: &[Step],
    goal: &Term,
    ctx: &ChainContext<'_>,
) -> Result<(), ProofError> {
    let mut current = start;
    for (i, step) in steps.iter().enumerate() {
        let position = i + 1;
        let is_last = position == steps.len();
        if step.target.is_none() && !is_last {
            return Err(ProofError::UntargetedStep.at_step(position, step.origin.as_ref()));
        }
        verify_step(current, step, goal, ctx)
            .map_err(|error| error.at_step(position, step.origin.as_ref()))?;
        match &step.target {
            Some(target) => current = target,
            None => return Ok(()),
        }
    }
    if !equals(current, goal) {
        return Err(ProofError::GoalMismatch {
            term: Box::new(current.clone()),
            goal: Box::new(goal.clone()),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "rewrite_tests.rs"]
mod tests;
