//! Replacing a parameter by a term.

use super::{Term, TermKind};

/// Returns a copy of `template` in which every variable named `param` is
/// replaced by an unmarked copy of `replacement`.
///
/// Terms have no binders, so every occurrence is free and no renaming is
/// needed. Marks elsewhere in `template` are kept.
///
///     use eqproof::Term;
///     use eqproof::term::substitute;
///
///     let t = Term::call("add", [Term::var("x"), Term::var("x")]);
///     let s = substitute(&t, "x", &Term::zero());
///     assert_eq!(s.to_string(), "(add 0 0)");
#[must_use]
pub fn substitute(template: &Term, param: &str, replacement: &Term) -> Term {
    substitute_with(template, &|name: &str| (name == param).then_some(replacement))
}

/// Replaces every variable for which `lookup` returns a term, all at once.
///
/// Replacements are not themselves searched, so a binding that mentions
/// another parameter is inserted as-is.
pub(crate) fn substitute_with<'a, F>(template: &Term, lookup: &F) -> Term
where
    F: Fn(&str) -> Option<&'a Term>,
{
    match template.kind() {
        TermKind::Var(name) => lookup(name).map_or_else(|| template.clone(), Term::unmarked),
        TermKind::Zero => template.clone(),
        TermKind::Compound(items) => Term {
            kind: TermKind::Compound(
                items
                    .iter()
                    .map(|item| substitute_with(item, lookup))
                    .collect(),
            ),
            marked: template.is_marked(),
        },
    }
}
