//! Declarations and the program-level driver.
//!
//! Declarations are verified in program order against a single
//! [`RuleRegistry`]. Definitions are registered outright, theorems once
//! their proof checks, and examples are checked but never registered.

use std::fmt;

use crate::config::{FailurePolicy, VerifyOptions};
use crate::diagnostic::SourceLocation;
use crate::error::{ProofError, Side, VerifyError};
use crate::newtypes::{Params, RuleName};
use crate::proof::{Equation, Proof, verify_proof};
use crate::registry::{Rule, RuleRegistry, write_params};
use crate::term::{MarkLayout, Term, mark_layout};

/// An assumed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// The rule's name.
    pub name: RuleName,
    /// Universally quantified parameters.
    pub params: Params,
    /// The defining equation.
    pub equation: Equation,
    /// Where it was written, when known.
    pub origin: Option<SourceLocation>,
}

/// A rule that must be proved before it is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theorem {
    /// The rule's name.
    pub name: RuleName,
    /// Universally quantified parameters.
    pub params: Params,
    /// The claimed equation.
    pub equation: Equation,
    /// Its proof.
    pub proof: Proof,
    /// Where it was written, when known.
    pub origin: Option<SourceLocation>,
}

/// An anonymous, unregistered claim about closed terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// Optional label for diagnostics.
    pub label: Option<String>,
    /// The claimed equation.
    pub equation: Equation,
    /// Its proof.
    pub proof: Proof,
    /// Where it was written, when known.
    pub origin: Option<SourceLocation>,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// `define`
    Define(Definition),
    /// `theorem`
    Theorem(Theorem),
    /// `example`
    Example(Example),
}

impl Declaration {
    /// Returns a short title such as `theorem add_x_zero`.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::Define(d) => format!("define {}", d.name),
            Self::Theorem(t) => format!("theorem {}", t.name),
            Self::Example(Example {
                label: Some(label), ..
            }) => format!("example '{label}'"),
            Self::Example(_) => "example".to_owned(),
        }
    }

    /// Returns where the declaration was written, when known.
    #[must_use]
    pub const fn origin(&self) -> Option<&SourceLocation> {
        match self {
            Self::Define(d) => d.origin.as_ref(),
            Self::Theorem(t) => t.origin.as_ref(),
            Self::Example(e) => e.origin.as_ref(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Define(d) => {
                write!(f, "define {} ", d.name)?;
                write_params(f, &d.params)?;
                write!(f, "{}", d.equation)
            }
            Self::Theorem(t) => {
                write!(f, "theorem {} ", t.name)?;
                write_params(f, &t.params)?;
                write!(f, "{}\n{}", t.equation, t.proof)
            }
            Self::Example(e) => write!(f, "example {}\n{}", e.equation, e.proof),
        }
    }
}

/// An ordered sequence of declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// The declarations, in verification order.
    pub declarations: Vec<Declaration>,
}

/// A mark found and cleared on a declared equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkWarning {
    /// Title of the declaration.
    pub declaration: String,
    /// The marked side.
    pub side: Side,
    /// The side as declared, marks included.
    pub term: Term,
}

impl fmt::Display for MarkWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} contains mark: {}",
            self.side, self.declaration, self.term
        )
    }
}

/// Verifies declarations one at a time, growing a registry.
#[derive(Debug, Default)]
pub struct Verifier {
    registry: RuleRegistry,
    options: VerifyOptions,
    warnings: Vec<MarkWarning>,
}

impl Verifier {
    /// Returns a verifier with an empty registry.
    #[must_use]
    pub fn new(options: VerifyOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Returns the rules registered so far.
    #[must_use]
    pub const fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Returns the mark warnings recorded so far.
    #[must_use]
    pub fn warnings(&self) -> &[MarkWarning] {
        &self.warnings
    }

    /// Verifies one declaration and registers it if it names a rule.
    ///
    /// The registry is unchanged when verification fails.
    ///
    /// # Errors
    ///
    /// Returns a [`VerifyError`] naming the declaration and the reason it
    /// was rejected.
    pub fn verify(&mut self, declaration: &Declaration) -> Result<(), VerifyError> {
        let title = declaration.title();
        self.check(declaration, &title)
            .map_err(|kind| VerifyError {
                declaration: title.clone(),
                origin: declaration.origin().cloned(),
                kind,
            })?;
        log::info!("{title}: verified");
        Ok(())
    }

    /// Consumes the verifier, returning its registry and warnings.
    #[must_use]
    pub fn finish(self) -> (RuleRegistry, Vec<MarkWarning>) {
        (self.registry, self.warnings)
    }

    fn check(&mut self, declaration: &Declaration, title: &str) -> Result<(), ProofError> {
        match declaration {
            Declaration::Define(d) => {
                self.registry.ensure_fresh(&d.name)?;
                let equation = self.clean_equation(&d.equation, title)?;
                self.registry.add(Rule {
                    name: d.name.clone(),
                    params: d.params.clone(),
                    lhs: equation.lhs,
                    rhs: equation.rhs,
                })
            }
            Declaration::Theorem(t) => {
                self.registry.ensure_fresh(&t.name)?;
                let equation = self.clean_equation(&t.equation, title)?;
                verify_proof(
                    &t.proof,
                    &t.params,
                    &equation,
                    &self.registry,
                    self.options.proof_marks,
                )?;
                self.registry.add(Rule {
                    name: t.name.clone(),
                    params: t.params.clone(),
                    lhs: equation.lhs,
                    rhs: equation.rhs,
                })
            }
            Declaration::Example(e) => {
                let equation = self.clean_equation(&e.equation, title)?;
                verify_proof(
                    &e.proof,
                    &Params::default(),
                    &equation,
                    &self.registry,
                    self.options.proof_marks,
                )
            }
        }
    }

    /// Returns the equation with its marks cleared.
    ///
    /// Marks on one root-to-leaf chain are cleared with a warning; marks in
    /// two sibling branches are a structural error.
    fn clean_equation(&mut self, equation: &Equation, title: &str) -> Result<Equation, ProofError> {
        Ok(Equation {
            lhs: self.clean_side(&equation.lhs, Side::Lhs, title)?,
            rhs: self.clean_side(&equation.rhs, Side::Rhs, title)?,
        })
    }

    fn clean_side(&mut self, term: &Term, side: Side, title: &str) -> Result<Term, ProofError> {
        match mark_layout(term) {
            MarkLayout::Unmarked => Ok(term.clone()),
            MarkLayout::Siblings { .. } => Err(ProofError::Structural {
                side,
                term: Box::new(term.clone()),
            }),
            MarkLayout::Single(_) | MarkLayout::Nested(_) => {
                let warning = MarkWarning {
                    declaration: title.to_owned(),
                    side,
                    term: term.clone(),
                };
                log::warn!("{warning}");
                self.warnings.push(warning);
                Ok(term.unmarked())
            }
        }
    }
}

/// The outcome of verifying a whole program.
#[derive(Debug)]
pub struct Report {
    /// Number of declarations that verified.
    pub verified: usize,
    /// Marks cleared from declared equations.
    pub warnings: Vec<MarkWarning>,
    /// Rejected declarations, in program order.
    pub failures: Vec<VerifyError>,
    /// The registry after the last verified declaration.
    pub registry: RuleRegistry,
}

impl Report {
    /// Reports whether every declaration verified.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the final registry, or the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first recorded [`VerifyError`].
    pub fn into_result(self) -> Result<RuleRegistry, VerifyError> {
        let Self {
            failures, registry, ..
        } = self;
        failures.into_iter().next().map_or(Ok(registry), Err)
    }
}

/// Verifies every declaration of `program` in order.
///
/// With [`FailurePolicy::Abort`] the first failure ends the run; with
/// [`FailurePolicy::Continue`] later declarations are still checked against
/// the rules that did verify.
///
///     use eqproof::{Program, VerifyOptions, verify_program};
///
///     let report = verify_program(&Program::default(), &VerifyOptions::default());
///     assert!(report.is_success());
#[must_use]
pub fn verify_program(program: &Program, options: &VerifyOptions) -> Report {
    let mut verifier = Verifier::new(*options);
    let mut verified = 0;
    let mut failures = Vec::new();
    for declaration in &program.declarations {
        match verifier.verify(declaration) {
            Ok(()) => verified += 1,
            Err(error) => {
                log::error!("{error}");
                failures.push(error);
                if options.on_failure == FailurePolicy::Abort {
                    break;
                }
            }
        }
    }
    let (registry, warnings) = verifier.finish();
    Report {
        verified,
        warnings,
        failures,
        registry,
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
