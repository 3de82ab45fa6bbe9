//! Property-based tests for the term model and matcher.
//!
//! These tests check algebraic laws over randomly generated terms using
//! proptest.

use eqproof::matcher::{Bindings, equals, instantiate, match_pattern};
use eqproof::term::{SUCC, substitute};
use eqproof::{Term, TermKind, params};
use proptest::prelude::*;

// ── Generators ──────────────────────────────────────────────────────

/// Terms over the given leaf symbols, with random marks.
fn term_over(symbols: &'static [&'static str]) -> impl Strategy<Value = Term> {
    let leaf = prop_oneof![
        Just(Term::zero()),
        proptest::sample::select(symbols).prop_map(Term::var),
    ];
    let unmarked = leaf.prop_recursive(4, 24, 4, |inner| {
        prop::collection::vec(inner, 1..4)
            .prop_map(|items| Term::compound(items).unwrap_or_else(Term::zero))
    });
    (unmarked, any::<bool>()).prop_map(|(t, mark)| if mark { t.marked() } else { t })
}

fn any_term() -> impl Strategy<Value = Term> {
    term_over(&["x", "b", "k", "add", SUCC])
}

/// Terms that never mention the parameters `x` and `b`.
fn closed_term() -> impl Strategy<Value = Term> {
    term_over(&["k", "a", "add", SUCC])
}

/// Counts `succ` wrappers around `0`, or `None` for any other shape.
fn succ_depth(term: &Term) -> Option<usize> {
    match term.kind() {
        TermKind::Zero => Some(0),
        TermKind::Compound(items) => match items.as_slice() {
            [head, inner] if head.as_var() == Some(SUCC) => succ_depth(inner).map(|d| d + 1),
            _ => None,
        },
        TermKind::Var(_) => None,
    }
}

// ── Equality ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn equality_is_reflexive(t in any_term()) {
        prop_assert!(equals(&t, &t));
    }

    #[test]
    fn equality_is_symmetric(a in any_term(), b in any_term()) {
        prop_assert_eq!(equals(&a, &b), equals(&b, &a));
    }

    #[test]
    fn equality_is_transitive(a in any_term(), b in any_term(), c in any_term()) {
        if equals(&a, &b) && equals(&b, &c) {
            prop_assert!(equals(&a, &c));
        }
    }

    #[test]
    fn equality_ignores_marks(t in any_term()) {
        prop_assert!(equals(&t, &t.unmarked()));
        prop_assert!(equals(&t.clone().marked(), &t));
    }
}

// ── Matching and substitution ───────────────────────────────────────

proptest! {
    #[test]
    fn instantiating_a_match_rebuilds_the_term(
        pattern in any_term(),
        x in closed_term(),
        b in closed_term(),
    ) {
        let term = substitute(&substitute(&pattern, "x", &x), "b", &b);
        let ps = params(["x", "b"]).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let mut bindings = Bindings::new();
        prop_assert!(match_pattern(&term, &pattern, &ps, &mut bindings));
        prop_assert!(equals(&instantiate(&pattern, &bindings), &term));
    }

    #[test]
    fn substituting_a_fresh_variable_by_itself_is_identity(t in any_term()) {
        prop_assert_eq!(substitute(&t, "z", &Term::var("z")), t);
    }

    #[test]
    fn matching_without_params_is_equality(a in any_term(), b in any_term()) {
        let mut bindings = Bindings::new();
        let matched = match_pattern(&a, &b, &Default::default(), &mut bindings);
        prop_assert_eq!(matched, equals(&a, &b));
        prop_assert!(bindings.is_empty());
    }
}

// ── Numerals ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn numeral_wraps_zero_n_times(n in 0u32..64) {
        let depth = usize::try_from(n).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(succ_depth(&Term::numeral(n)), Some(depth));
    }
}

#[test]
fn numeral_zero_is_zero() {
    assert_eq!(Term::numeral(0), Term::zero());
}
