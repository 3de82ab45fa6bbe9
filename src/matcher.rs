//! One-directional pattern matching and structural equality.
//!
//! A pattern is an ordinary [`Term`] whose variables named in a parameter
//! set act as holes. Matching is linear: the first occurrence of a parameter
//! binds it and every later occurrence must be structurally equal to that
//! binding. Marks play no part in matching.

use std::fmt;

use indexmap::IndexMap;

use crate::newtypes::Params;
use crate::term::{Term, TermKind, substitute_with};

/// Parameter bindings produced by a match, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings(IndexMap<String, Term>);

impl Bindings {
    /// Returns an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the term bound to `param`.
    #[must_use]
    pub fn get(&self, param: &str) -> Option<&Term> {
        self.0.get(param)
    }

    /// Returns the number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Reports whether nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(param, term)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.0.iter().map(|(param, term)| (param.as_str(), term))
    }

    fn bind(&mut self, param: &str, term: &Term) {
        self.0.insert(param.to_owned(), term.clone());
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (param, term)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param} -> {term}")?;
        }
        f.write_str("}")
    }
}

/// Matches `term` against `pattern`, extending `bindings`.
///
/// Variables of `pattern` listed in `params` bind (or must agree with an
/// existing binding); every other variable is a literal symbol. Compound
/// terms match element-wise and must have the same length. On failure
/// `bindings` may hold partial results and should be discarded.
///
///     use eqproof::{Term, params};
///     use eqproof::matcher::{Bindings, match_pattern};
///
///     let ps = params(["x"]).unwrap();
///     let pattern = Term::call("add", [Term::var("x"), Term::var("x")]);
///     let mut b = Bindings::new();
///     assert!(match_pattern(&Term::call("add", [Term::zero(), Term::zero()]), &pattern, &ps, &mut b));
///     assert_eq!(b.get("x"), Some(&Term::zero()));
///
///     let mut b = Bindings::new();
///     assert!(!match_pattern(&Term::call("add", [Term::zero(), Term::numeral(1)]), &pattern, &ps, &mut b));
pub fn match_pattern(term: &Term, pattern: &Term, params: &Params, bindings: &mut Bindings) -> bool {
    // Explicit work list, left to right: numerals nest one level per unit.
    let mut pending = vec![(term, pattern)];
    while let Some((item, pat)) = pending.pop() {
        let matched = match pat.kind() {
            TermKind::Zero => matches!(item.kind(), TermKind::Zero),
            TermKind::Var(name) => match bindings.get(name) {
                Some(bound) => equals(item, bound),
                None if params.contains(name.as_str()) => {
                    bindings.bind(name, item);
                    true
                }
                None => item.as_var() == Some(name.as_str()),
            },
            TermKind::Compound(patterns) => match item.kind() {
                TermKind::Compound(items) if items.len() == patterns.len() => {
                    pending.extend(items.iter().zip(patterns).rev());
                    true
                }
                TermKind::Compound(_) | TermKind::Zero | TermKind::Var(_) => false,
            },
        };
        if !matched {
            return false;
        }
    }
    true
}

/// Structural equality: matching with no parameters.
///
/// Marks are ignored.
#[must_use]
pub fn equals(a: &Term, b: &Term) -> bool {
    match_pattern(a, b, &Params::default(), &mut Bindings::new())
}

/// Replaces every bound parameter of `pattern` by its binding.
///
/// All parameters are replaced simultaneously; unbound variables are left
/// in place.
#[must_use]
pub fn instantiate(pattern: &Term, bindings: &Bindings) -> Term {
    substitute_with(pattern, &|name: &str| bindings.get(name))
}
