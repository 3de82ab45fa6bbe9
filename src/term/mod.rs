//! The expression tree that proofs rewrite.
//!
//! A [`Term`] is `0`, a symbol, or a non-empty compound application. Every
//! node carries a focus flag ("mark") that selects where the next rewrite
//! step applies. Terms are plain owned values: the verifier reads them and
//! builds new trees by substitution, it never edits one in place.

mod marks;
mod substitute;

use std::fmt;

use crate::error::ProofError;

pub use marks::{MarkLayout, TermPath, mark_layout, marked_paths};
pub use substitute::substitute;
pub(crate) use substitute::substitute_with;

/// The symbol used to build successor terms.
pub const SUCC: &str = "succ";

/// The shape of a [`Term`] node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// The base numeral.
    Zero,
    /// A parameter, constant, or function symbol.
    Var(String),
    /// An ordered application `(t1 t2 ...)`; never empty.
    Compound(Vec<Term>),
}

/// A node of the expression tree together with its focus flag.
///
/// `PartialEq` compares marks too. Use [`crate::matcher::equals`] for the
/// structural equality that proofs are checked against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    kind: TermKind,
    marked: bool,
}

impl Term {
    /// Returns the base numeral `0`.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            kind: TermKind::Zero,
            marked: false,
        }
    }

    /// Returns the symbol `name`.
    #[must_use]
    pub fn var(name: impl Into<String>) -> Self {
        Self {
            kind: TermKind::Var(name.into()),
            marked: false,
        }
    }

    /// Builds a compound term from its elements.
    ///
    /// Returns `None` for an empty list, which is not a term.
    #[must_use]
    pub fn compound(items: Vec<Self>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self {
            kind: TermKind::Compound(items),
            marked: false,
        })
    }

    /// Builds the application `(head args...)`.
    ///
    ///     use eqproof::Term;
    ///
    ///     let t = Term::call("add", [Term::var("x"), Term::zero()]);
    ///     assert_eq!(t.to_string(), "(add x 0)");
    #[must_use]
    pub fn call(head: impl Into<String>, args: impl IntoIterator<Item = Self>) -> Self {
        let mut items = vec![Self::var(head)];
        items.extend(args);
        Self {
            kind: TermKind::Compound(items),
            marked: false,
        }
    }

    /// Returns `(succ inner)`.
    #[must_use]
    pub fn succ(inner: Self) -> Self {
        Self::call(SUCC, [inner])
    }

    /// Returns `n` successor applications wrapped around `0`.
    ///
    ///     use eqproof::Term;
    ///
    ///     assert_eq!(Term::numeral(2).to_string(), "(succ (succ 0))");
    ///     assert_eq!(Term::numeral(0), Term::zero());
    #[must_use]
    pub fn numeral(n: u32) -> Self {
        (0..n).fold(Self::zero(), |acc, _| Self::succ(acc))
    }

    /// Returns this term with its own focus flag set.
    #[must_use]
    pub fn marked(mut self) -> Self {
        self.marked = true;
        self
    }

    /// Returns the shape of this node.
    #[must_use]
    pub const fn kind(&self) -> &TermKind {
        &self.kind
    }

    /// Reports whether this node itself is marked.
    #[must_use]
    pub const fn is_marked(&self) -> bool {
        self.marked
    }

    /// Returns the elements of a compound term, or an empty slice.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.kind {
            TermKind::Compound(items) => items,
            TermKind::Zero | TermKind::Var(_) => &[],
        }
    }

    /// Returns the symbol name if this node is a variable.
    #[must_use]
    pub fn as_var(&self) -> Option<&str> {
        match &self.kind {
            TermKind::Var(name) => Some(name),
            TermKind::Zero | TermKind::Compound(_) => None,
        }
    }

    /// Returns the subterm reached by following `path` from this node.
    #[must_use]
    pub fn at(&self, path: &TermPath) -> Option<&Self> {
        path.indices()
            .iter()
            .try_fold(self, |node, &index| node.children().get(index))
    }

    /// Returns the marked subterm, or `None` when nothing is marked.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::MultipleMarks`] when more than one node is
    /// marked, whether nested or in sibling branches.
    pub fn find_marked(&self) -> Result<Option<&Self>, ProofError> {
        match mark_layout(self) {
            MarkLayout::Unmarked => Ok(None),
            MarkLayout::Single(path) => Ok(self.at(&path)),
            MarkLayout::Nested(_) | MarkLayout::Siblings { .. } => Err(ProofError::MultipleMarks {
                term: Box::new(self.clone()),
            }),
        }
    }

    /// Reports whether any node in this tree is marked.
    #[must_use]
    pub fn contains_mark(&self) -> bool {
        self.marked || self.children().iter().any(Self::contains_mark)
    }

    /// Returns a copy of this tree with every focus flag cleared.
    #[must_use]
    pub fn unmarked(&self) -> Self {
        let kind = match &self.kind {
            TermKind::Compound(items) => {
                TermKind::Compound(items.iter().map(Self::unmarked).collect())
            }
            other => other.clone(),
        };
        Self {
            kind,
            marked: false,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = if self.marked { ("[", "]") } else { ("(", ")") };
        match &self.kind {
            TermKind::Zero if self.marked => f.write_str("[0]"),
            TermKind::Zero => f.write_str("0"),
            TermKind::Var(name) if self.marked => write!(f, "[{name}]"),
            TermKind::Var(name) => f.write_str(name),
            TermKind::Compound(items) => {
                f.write_str(open)?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(close)
            }
        }
    }
}
