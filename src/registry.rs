//! The append-only table of named rewrite rules.
//!
//! Definitions and proved theorems are registered in program order. A
//! declaration is checked against the registry as it stood before that
//! declaration, so no proof can cite itself or a later rule.

use std::fmt;

use indexmap::IndexMap;

use crate::error::ProofError;
use crate::newtypes::{Params, RuleName};
use crate::term::Term;

/// A named equality `lhs = rhs`, universally quantified over `params`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// The rule's unique name.
    pub name: RuleName,
    /// The universally quantified parameters.
    pub params: Params,
    /// The left-hand side.
    pub lhs: Term,
    /// The right-hand side.
    pub rhs: Term,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.name)?;
        write_params(f, &self.params)?;
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

/// Writes `<p q> ` for a non-empty parameter list, nothing otherwise.
pub(crate) fn write_params(f: &mut fmt::Formatter<'_>, params: &Params) -> fmt::Result {
    if params.is_empty() {
        return Ok(());
    }
    f.write_str("<")?;
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{param}")?;
    }
    f.write_str("> ")
}

/// Rules available to proofs, keyed by name in registration order.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: IndexMap<RuleName, Rule>,
}

impl RuleRegistry {
    /// Returns an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::DuplicateRuleName`] if a rule with the same
    /// name is already registered; the registry is left unchanged.
    pub fn add(&mut self, rule: Rule) -> Result<(), ProofError> {
        self.ensure_fresh(&rule.name)?;
        log::debug!("registered rule {rule}");
        self.rules.insert(rule.name.clone(), rule);
        Ok(())
    }

    /// Fails if `name` is already registered.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::DuplicateRuleName`] for a registered name.
    pub fn ensure_fresh(&self, name: &RuleName) -> Result<(), ProofError> {
        if self.contains(name.as_str()) {
            return Err(ProofError::DuplicateRuleName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Reports whether a rule named `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Reports whether no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over the rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the rule registry.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::newtypes::params;

    /// Fixture: `add_zero <b>: (add 0 b) = b`.
    #[fixture]
    fn add_zero() -> Option<Rule> {
        Some(Rule {
            name: RuleName::new("add_zero").ok()?,
            params: params(["b"]).ok()?,
            lhs: Term::call("add", [Term::zero(), Term::var("b")]),
            rhs: Term::var("b"),
        })
    }

    #[rstest]
    fn added_rules_can_be_found(add_zero: Option<Rule>) {
        let Some(rule) = add_zero else {
            panic!("fixture rule should build");
        };
        let mut registry = RuleRegistry::new();
        assert!(registry.add(rule.clone()).is_ok());
        assert_eq!(registry.find("add_zero"), Some(&rule));
        assert!(registry.find("add_succ").is_none());
    }

    #[rstest]
    fn duplicate_names_are_rejected(add_zero: Option<Rule>) {
        let Some(rule) = add_zero else {
            panic!("fixture rule should build");
        };
        let mut registry = RuleRegistry::new();
        assert!(registry.add(rule.clone()).is_ok());
        let result = registry.add(rule);
        assert!(matches!(
            result,
            Err(ProofError::DuplicateRuleName { ref name }) if name == "add_zero"
        ));
        assert_eq!(registry.len(), 1);
    }

    #[rstest]
    fn rules_render_with_params(add_zero: Option<Rule>) {
        let rendered = add_zero.map(|r| r.to_string()).unwrap_or_default();
        assert_eq!(rendered, "add_zero <b> (add 0 b) = b");
    }
}
