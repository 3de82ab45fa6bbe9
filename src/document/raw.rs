//! Internal raw document types with source-location capture.
//!
//! These types mirror the document shape but use `serde_saphyr::Spanned`
//! for names and step justifications so validation and verification
//! failures can be mapped back to line and column coordinates.

use serde::Deserialize;
use serde_saphyr::{Location, Spanned};

use crate::newtypes::{Param, RuleName};

/// A term as written: numeral, symbol, list, or mark.
///
/// `Compound` precedes `Marked` so that a one-element list is never read
/// as the sequence form of [`RawMark`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawTerm {
    Numeral(u32),
    Symbol(String),
    Compound(Vec<RawTerm>),
    Marked(RawMark),
}

/// `{mark: term}`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawMark {
    pub(crate) mark: Box<RawTerm>,
}

/// One declaration document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawDeclaration {
    #[serde(default)]
    pub(crate) define: Option<Spanned<RuleName>>,
    #[serde(default)]
    pub(crate) theorem: Option<Spanned<RuleName>>,
    #[serde(default)]
    pub(crate) example: Option<Spanned<String>>,
    #[serde(default)]
    pub(crate) params: Vec<Spanned<Param>>,
    pub(crate) lhs: RawTerm,
    pub(crate) rhs: RawTerm,
    #[serde(default)]
    pub(crate) proof: Option<RawProof>,
}

/// A proof: either `start`/`steps` or `induction`/`base`/`step`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawProof {
    #[serde(default)]
    pub(crate) start: Option<RawTerm>,
    #[serde(default)]
    pub(crate) steps: Option<Vec<RawStep>>,
    #[serde(default)]
    pub(crate) induction: Option<Spanned<Param>>,
    #[serde(default)]
    pub(crate) base: Option<RawDirect>,
    #[serde(default)]
    pub(crate) step: Option<RawDirect>,
}

/// One case of an induction proof.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawDirect {
    #[serde(default)]
    pub(crate) start: Option<RawTerm>,
    #[serde(default)]
    pub(crate) steps: Vec<RawStep>,
}

/// One rewrite step.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawStep {
    #[serde(default)]
    pub(crate) by: Option<Spanned<RuleName>>,
    #[serde(default)]
    pub(crate) induction: Option<Spanned<bool>>,
    #[serde(default)]
    pub(crate) todo: Option<Spanned<bool>>,
    #[serde(default)]
    pub(crate) reversed: bool,
    #[serde(default)]
    pub(crate) to: Option<RawTerm>,
}

impl RawDeclaration {
    /// Returns a title for diagnostics, falling back to the document
    /// position when no header is present.
    pub(crate) fn title(&self, index: usize) -> String {
        if let Some(name) = &self.define {
            return format!("define {}", name.value);
        }
        if let Some(name) = &self.theorem {
            return format!("theorem {}", name.value);
        }
        match &self.example {
            Some(label) if !label.value.trim().is_empty() => format!("example '{}'", label.value),
            Some(_) => "example".to_owned(),
            None => format!("document {}", index + 1),
        }
    }

    /// Returns the location of the declaration header, if any.
    pub(crate) fn header_location(&self) -> Option<Location> {
        self.define
            .as_ref()
            .or(self.theorem.as_ref())
            .map(|name| name.referenced)
            .or_else(|| self.example.as_ref().map(|label| label.referenced))
    }
}

impl RawStep {
    /// Returns the location of the step's justification, if any.
    pub(crate) fn location(&self) -> Option<Location> {
        self.by
            .as_ref()
            .map(|by| by.referenced)
            .or_else(|| self.induction.as_ref().map(|flag| flag.referenced))
            .or_else(|| self.todo.as_ref().map(|flag| flag.referenced))
    }

    /// Reports whether the `induction` flag is set.
    pub(crate) fn is_induction(&self) -> bool {
        self.induction.as_ref().is_some_and(|flag| flag.value)
    }

    /// Reports whether the `todo` flag is set.
    pub(crate) fn is_todo(&self) -> bool {
        self.todo.as_ref().is_some_and(|flag| flag.value)
    }
}
