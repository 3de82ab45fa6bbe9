//! Locating focus marks inside a term.
//!
//! A focus is identified by its [`TermPath`], the sequence of child indices
//! leading to it from the root. Rewriting compares two trees in lock-step,
//! so a path locates the rewrite site in the target tree as well.

use std::fmt;

use super::Term;

/// A sequence of child indices from the root of a term.
///
/// The empty path denotes the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TermPath(Vec<usize>);

impl TermPath {
    /// Returns the path to the root.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns the child indices, outermost first.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Reports whether `self` leads to an ancestor of (or the same node as)
    /// `other`.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.0.starts_with(&self.0)
    }

    fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }
}

impl From<Vec<usize>> for TermPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for TermPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

/// Returns the path of every marked node, in pre-order.
#[must_use]
pub fn marked_paths(term: &Term) -> Vec<TermPath> {
    let mut found = Vec::new();
    collect_marks(term, &TermPath::root(), &mut found);
    found
}

fn collect_marks(term: &Term, path: &TermPath, found: &mut Vec<TermPath>) {
    if term.is_marked() {
        found.push(path.clone());
    }
    for (index, child) in term.children().iter().enumerate() {
        collect_marks(child, &path.child(index), found);
    }
}

/// How the marks of a term are arranged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkLayout {
    /// No node is marked.
    Unmarked,
    /// Exactly one node is marked.
    Single(TermPath),
    /// Several marks, each nested inside the previous one.
    Nested(Vec<TermPath>),
    /// Two marks in different branches of a compound term.
    Siblings {
        /// The first mark in pre-order.
        first: TermPath,
        /// The first mark found outside the subtree of an earlier one.
        second: TermPath,
    },
}

impl MarkLayout {
    /// Returns the first mark in pre-order, if any.
    #[must_use]
    pub fn first(&self) -> Option<&TermPath> {
        match self {
            Self::Unmarked => None,
            Self::Single(path) => Some(path),
            Self::Nested(paths) => paths.first(),
            Self::Siblings { first, .. } => Some(first),
        }
    }
}

/// Classifies the marks of `term`.
///
/// Pre-order visits an ancestor before its descendants, so the marks lie on
/// a single root-to-leaf chain exactly when each one is a prefix of the
/// next.
///
///     use eqproof::Term;
///     use eqproof::term::{MarkLayout, mark_layout};
///
///     let t = Term::call("f", [Term::var("a").marked(), Term::var("b").marked()]);
///     assert!(matches!(mark_layout(&t), MarkLayout::Siblings { .. }));
#[must_use]
pub fn mark_layout(term: &Term) -> MarkLayout {
    let paths = marked_paths(term);
    let sibling = paths
        .windows(2)
        .find_map(|pair| match pair {
            [first, second] if !first.is_prefix_of(second) => Some((first, second)),
            _ => None,
        });
    if let Some((first, second)) = sibling {
        return MarkLayout::Siblings {
            first: first.clone(),
            second: second.clone(),
        };
    }
    let mut iter = paths.into_iter();
    match (iter.next(), iter.len()) {
        (None, _) => MarkLayout::Unmarked,
        (Some(only), 0) => MarkLayout::Single(only),
        (Some(first), _) => MarkLayout::Nested(std::iter::once(first).chain(iter).collect()),
    }
}
