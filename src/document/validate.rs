//! Post-deserialization validation and lowering of declaration documents.
//!
//! These checks enforce constraints that `serde` attributes cannot express,
//! such as "exactly one declaration header" and "a step names exactly one
//! justification". The entry point is [`lower_declaration`], called by the
//! loader after successful YAML deserialization.

use serde_saphyr::Location;

use super::raw::{RawDeclaration, RawDirect, RawProof, RawStep, RawTerm};
use crate::diagnostic::SourceLocation;
use crate::identifier::validate_identifier;
use crate::newtypes::Params;
use crate::program::{Declaration, Definition, Example, Theorem};
use crate::proof::{Direct, Equation, Proof};
use crate::rewrite::{Direction, Step, StepKind};
use crate::term::Term;

/// A validation failure with its best-known location.
#[derive(Debug)]
pub(crate) struct Invalid {
    pub(crate) reason: String,
    pub(crate) location: Option<Location>,
}

impl Invalid {
    fn new(reason: impl Into<String>, location: Option<Location>) -> Self {
        Self {
            reason: reason.into(),
            location,
        }
    }
}

/// Converts a serde-saphyr location into a diagnostic location.
pub(crate) fn location_for_source(source: &str, location: Location) -> SourceLocation {
    let line = usize::try_from(location.line()).ok().unwrap_or(usize::MAX);
    let column = usize::try_from(location.column())
        .ok()
        .unwrap_or(usize::MAX);
    SourceLocation {
        source: source.to_owned(),
        line,
        column,
    }
}

// ── Public entry point ──────────────────────────────────────────────

/// Validates a raw declaration and lowers it into the verifier's model.
///
/// Checks applied (in order):
///
/// - Exactly one of `define`, `theorem`, `example` is present.
/// - Parameters are unique; examples declare none.
/// - Definitions carry no proof; theorems and examples carry one.
/// - Every term is well formed: non-empty lists, valid symbols.
/// - A proof is either direct or induction, never a mix of both.
/// - Every step names exactly one of `by`, `induction: true`, `todo: true`.
///
/// # Errors
///
/// Returns an [`Invalid`] describing the first violation.
pub(crate) fn lower_declaration(
    raw: &RawDeclaration,
    source: &str,
) -> Result<Declaration, Invalid> {
    let header = raw.header_location();
    let origin = header.map(|location| location_for_source(source, location));
    let params = lower_params(raw)?;
    let equation = Equation::new(
        lower_term(&raw.lhs).map_err(|reason| Invalid::new(format!("lhs: {reason}"), header))?,
        lower_term(&raw.rhs).map_err(|reason| Invalid::new(format!("rhs: {reason}"), header))?,
    );

    match (&raw.define, &raw.theorem, &raw.example) {
        (Some(name), None, None) => {
            if raw.proof.is_some() {
                return Err(Invalid::new("a definition must not carry a proof", header));
            }
            Ok(Declaration::Define(Definition {
                name: name.value.clone(),
                params,
                equation,
                origin,
            }))
        }
        (None, Some(name), None) => Ok(Declaration::Theorem(Theorem {
            name: name.value.clone(),
            params,
            equation,
            proof: lower_required_proof(raw, source, header)?,
            origin,
        })),
        (None, None, Some(label)) => {
            if !params.is_empty() {
                return Err(Invalid::new("an example must not declare params", header));
            }
            let text = label.value.trim();
            Ok(Declaration::Example(Example {
                label: (!text.is_empty()).then(|| text.to_owned()),
                equation,
                proof: lower_required_proof(raw, source, header)?,
                origin,
            }))
        }
        (None, None, None) => Err(Invalid::new(
            "document must declare one of define, theorem, or example",
            None,
        )),
        _ => Err(Invalid::new(
            "document must declare only one of define, theorem, or example",
            header,
        )),
    }
}

// ── Individual lowering helpers ─────────────────────────────────────

fn lower_params(raw: &RawDeclaration) -> Result<Params, Invalid> {
    let mut params = Params::with_capacity(raw.params.len());
    for param in &raw.params {
        if !params.insert(param.value.clone()) {
            return Err(Invalid::new(
                format!("param '{}' is declared twice", param.value),
                Some(param.referenced),
            ));
        }
    }
    Ok(params)
}

/// Largest numeral literal a document may write.
///
/// A numeral expands to that many nested `succ` applications and every
/// traversal of a term recurses once per level.
pub(crate) const MAX_NUMERAL: u32 = 1024;

fn lower_numeral(n: u32) -> Result<Term, String> {
    if n > MAX_NUMERAL {
        return Err(format!("numeral {n} exceeds the largest literal {MAX_NUMERAL}"));
    }
    Ok(Term::numeral(n))
}

/// Lowers a raw term, validating symbols, numerals and list lengths.
pub(crate) fn lower_term(raw: &RawTerm) -> Result<Term, String> {
    match raw {
        RawTerm::Numeral(n) => lower_numeral(*n),
        // plain scalars may arrive as strings
        RawTerm::Symbol(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => s
            .parse::<u32>()
            .map_err(|_| format!("numeral {s} exceeds the largest literal {MAX_NUMERAL}"))
            .and_then(lower_numeral),
        RawTerm::Symbol(s) => {
            validate_identifier(s).map_err(|error| error.to_string())?;
            Ok(Term::var(s.as_str()))
        }
        RawTerm::Marked(mark) => lower_term(&mark.mark).map(Term::marked),
        RawTerm::Compound(items) => {
            let lowered = items.iter().map(lower_term).collect::<Result<Vec<_>, _>>()?;
            Term::compound(lowered).ok_or_else(|| "a compound term must not be empty".to_owned())
        }
    }
}

fn lower_required_proof(
    raw: &RawDeclaration,
    source: &str,
    header: Option<Location>,
) -> Result<Proof, Invalid> {
    let Some(proof) = &raw.proof else {
        return Err(Invalid::new("a theorem or example must carry a proof", header));
    };
    lower_proof(proof, source, header)
}

fn lower_proof(raw: &RawProof, source: &str, header: Option<Location>) -> Result<Proof, Invalid> {
    match (&raw.induction, &raw.base, &raw.step) {
        (None, None, None) => Ok(Proof::Direct(lower_direct(
            raw.start.as_ref(),
            raw.steps.as_deref().unwrap_or_default(),
            source,
            "proof",
        )?)),
        (Some(var), Some(base), Some(step)) => {
            if raw.start.is_some() || raw.steps.is_some() {
                return Err(Invalid::new(
                    "an induction proof takes its steps in base and step",
                    Some(var.referenced),
                ));
            }
            Ok(Proof::Induction {
                var: var.value.to_string(),
                base: lower_case(base, source, "base")?,
                step: lower_case(step, source, "step")?,
            })
        }
        (var, _, _) => Err(Invalid::new(
            "an induction proof needs induction, base, and step",
            var.as_ref().map(|v| v.referenced).or(header),
        )),
    }
}

fn lower_case(raw: &RawDirect, source: &str, path: &str) -> Result<Direct, Invalid> {
    lower_direct(raw.start.as_ref(), &raw.steps, source, path)
}

fn lower_direct(
    raw_start: Option<&RawTerm>,
    raw_steps: &[RawStep],
    source: &str,
    path: &str,
) -> Result<Direct, Invalid> {
    let start = raw_start
        .map(lower_term)
        .transpose()
        .map_err(|reason| Invalid::new(format!("{path} start: {reason}"), None))?;
    let steps = raw_steps
        .iter()
        .enumerate()
        .map(|(i, step)| lower_step(step, source, path, i + 1))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Direct { start, steps })
}

fn lower_step(raw: &RawStep, source: &str, path: &str, pos: usize) -> Result<Step, Invalid> {
    let location = raw.location();
    let direction = if raw.reversed {
        Direction::Reversed
    } else {
        Direction::Forward
    };
    let kind = match (&raw.by, raw.is_induction(), raw.is_todo()) {
        (Some(rule), false, false) => StepKind::Named {
            rule: rule.value.clone(),
            direction,
        },
        (None, true, false) => StepKind::Induction { direction },
        (None, false, true) if !raw.reversed => StepKind::Todo,
        (None, false, true) => {
            return Err(Invalid::new(
                format!("{path} step {pos}: a todo step cannot be reversed"),
                location,
            ));
        }
        _ => {
            return Err(Invalid::new(
                format!(
                    "{path} step {pos}: must name exactly one of by, induction: true, or todo: true"
                ),
                location,
            ));
        }
    };
    let target = raw
        .to
        .as_ref()
        .map(lower_term)
        .transpose()
        .map_err(|reason| Invalid::new(format!("{path} step {pos} target: {reason}"), location))?;
    Ok(Step {
        kind,
        target,
        origin: location.map(|l| location_for_source(source, l)),
    })
}
