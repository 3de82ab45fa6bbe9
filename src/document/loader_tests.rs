//! Unit tests for program document loading.

use rstest::rstest;

use super::*;
use crate::config::{FailurePolicy, MarkPolicy};
use crate::program::Declaration;
use crate::proof::Proof;
use crate::rewrite::{Direction, StepKind};
use crate::term::Term;

/// A definition followed by an example that cites it.
const MINIMAL_YAML: &str = r"
define: add_zero
params: [b]
lhs: [add, 0, b]
rhs: b
---
example: zero plus two
lhs: [add, 0, 2]
rhs: 2
proof:
  steps:
    - by: add_zero
";

#[rstest]
fn load_definition_and_example() {
    let program = load_program(MINIMAL_YAML).expect("should parse");
    assert_eq!(program.declarations.len(), 2);
    let titles: Vec<String> = program.declarations.iter().map(Declaration::title).collect();
    assert_eq!(titles, ["define add_zero", "example 'zero plus two'"]);
}

#[rstest]
fn integers_lower_to_numerals() {
    let program = load_program(MINIMAL_YAML).expect("should parse");
    let Some(Declaration::Example(example)) = program.declarations.get(1) else {
        panic!("second declaration should be an example");
    };
    assert_eq!(example.equation.rhs, Term::numeral(2));
    assert_eq!(example.equation.lhs.to_string(), "(add 0 (succ (succ 0)))");
}

#[rstest]
fn declarations_and_steps_carry_origins() {
    let program = load_program_with_source("add.proof", MINIMAL_YAML).expect("should parse");
    let Some(Declaration::Example(example)) = program.declarations.get(1) else {
        panic!("second declaration should be an example");
    };
    let header = example.origin.as_ref().expect("header location");
    assert_eq!(header.source, "add.proof");
    let Proof::Direct(direct) = &example.proof else {
        panic!("expected a direct proof");
    };
    let step = direct
        .steps
        .first()
        .and_then(|s| s.origin.as_ref())
        .expect("step location");
    assert!(step.line > header.line);
}

#[rstest]
fn load_induction_proof_with_marks() {
    let yaml = r"
theorem: add_x_zero
params: [x]
lhs: [add, x, 0]
rhs: x
proof:
  induction: x
  base:
    steps:
      - by: add_zero
  step:
    steps:
      - by: add_succ
        to: [succ, {mark: [add, x, 0]}]
      - induction: true
";
    let program = load_program(yaml).expect("should parse");
    let Some(Declaration::Theorem(theorem)) = program.declarations.first() else {
        panic!("expected a theorem");
    };
    let Proof::Induction { var, step, .. } = &theorem.proof else {
        panic!("expected an induction proof");
    };
    assert_eq!(var, "x");
    let target = step.steps.first().and_then(|s| s.target.as_ref());
    assert_eq!(
        target.map(ToString::to_string).as_deref(),
        Some("(succ [add x 0])")
    );
    assert!(matches!(
        step.steps.get(1).map(|s| &s.kind),
        Some(StepKind::Induction { .. })
    ));
}

#[rstest]
fn reversed_and_todo_steps() {
    let yaml = r"
example: ''
lhs: 2
rhs: [add, 0, 2]
proof:
  steps:
    - by: add_zero
      reversed: true
      to: [add, 0, 2]
    - todo: true
";
    let program = load_program(yaml).expect("should parse");
    let Some(Declaration::Example(example)) = program.declarations.first() else {
        panic!("expected an example");
    };
    assert_eq!(example.label, None);
    let Proof::Direct(direct) = &example.proof else {
        panic!("expected a direct proof");
    };
    let rendered: Vec<String> = direct.steps.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["by rev add_zero => (add 0 (succ (succ 0)))", "todo"]);
}

#[rstest]
fn reversed_induction_step() {
    let yaml = r"
theorem: t
params: [x]
lhs: [add, x, 0]
rhs: x
proof:
  induction: x
  base:
    steps:
      - todo: true
  step:
    steps:
      - induction: true
        reversed: true
";
    let program = load_program(yaml).expect("should parse");
    let Some(Declaration::Theorem(theorem)) = program.declarations.first() else {
        panic!("expected a theorem");
    };
    let Proof::Induction { step, .. } = &theorem.proof else {
        panic!("expected an induction proof");
    };
    assert_eq!(
        step.steps.first().map(|s| &s.kind),
        Some(&StepKind::Induction {
            direction: Direction::Reversed
        })
    );
}

#[rstest]
#[case::integer("define: a\nlhs: 1024\nrhs: 0\n")]
#[case::quoted("define: a\nlhs: '1024'\nrhs: 0\n")]
fn largest_numeral_is_accepted(#[case] yaml: &str) {
    let program = load_program(yaml).expect("should parse");
    let Some(Declaration::Define(definition)) = program.declarations.first() else {
        panic!("expected a definition");
    };
    assert_eq!(definition.equation.lhs, Term::numeral(1024));
}

#[rstest]
#[case::integer("define: a\nlhs: 1025\nrhs: 0\n")]
#[case::quoted("define: a\nlhs: '1025'\nrhs: 0\n")]
#[case::in_target("theorem: a\nlhs: 0\nrhs: 0\nproof:\n  steps:\n    - todo: true\n      to: 4000000\n")]
#[case::beyond_u32("define: a\nlhs: '99999999999'\nrhs: 0\n")]
fn oversized_numeral_is_rejected_with_a_location(#[case] yaml: &str) {
    let err = load_program_with_source("big.proof", yaml).expect_err("numeral too large");
    let DocumentError::ValidationFailed { reason, .. } = &err else {
        panic!("expected a validation failure, got {err}");
    };
    assert!(reason.contains("exceeds the largest literal 1024"), "{reason}");
    let diagnostic = err.diagnostic().expect("validation diagnostic");
    assert_eq!(diagnostic.code, DiagnosticCode::ValidationFailure);
    assert!(diagnostic.location.is_some());
}

#[rstest]
#[case::unknown_key("define: a\nlhs: 0\nrhs: 0\nlhz: 0\n")]
#[case::missing_rhs("define: a\nlhs: 0\n")]
#[case::invalid_rule_name("define: 9lives\nlhs: 0\nrhs: 0\n")]
#[case::reserved_param("define: a\nparams: [proof]\nlhs: 0\nrhs: 0\n")]
#[case::malformed("define: [a\n")]
fn reject_at_deserialization(#[case] yaml: &str) {
    let err = load_program(yaml).expect_err("should reject");
    assert!(matches!(err, DocumentError::Deserialize { .. }), "{err}");
}

#[rstest]
#[case::no_header("lhs: 0\nrhs: 0\n", "one of define")]
#[case::two_headers("define: a\ntheorem: b\nlhs: 0\nrhs: 0\nproof: {}\n", "only one")]
#[case::define_with_proof("define: a\nlhs: 0\nrhs: 0\nproof: {}\n", "must not carry a proof")]
#[case::theorem_without_proof("theorem: a\nlhs: 0\nrhs: 0\n", "must carry a proof")]
#[case::example_with_params("example: e\nparams: [x]\nlhs: 0\nrhs: 0\nproof: {}\n", "params")]
#[case::duplicate_param("define: a\nparams: [x, x]\nlhs: 0\nrhs: 0\n", "declared twice")]
#[case::empty_list("define: a\nlhs: []\nrhs: 0\n", "must not be empty")]
#[case::reserved_symbol("define: a\nlhs: [by, 0]\nrhs: 0\n", "lhs")]
#[case::half_induction("theorem: a\nparams: [x]\nlhs: x\nrhs: x\nproof:\n  induction: x\n", "needs induction")]
#[case::step_without_reason("theorem: a\nlhs: 0\nrhs: 0\nproof:\n  steps:\n    - to: 0\n", "exactly one")]
#[case::reversed_todo("theorem: a\nlhs: 0\nrhs: 0\nproof:\n  steps:\n    - todo: true\n      reversed: true\n", "cannot be reversed")]
fn reject_at_validation(#[case] yaml: &str, #[case] fragment: &str) {
    let err = load_program(yaml).expect_err("should reject");
    let DocumentError::ValidationFailed { reason, .. } = &err else {
        panic!("expected a validation failure, got {err}");
    };
    assert!(reason.contains(fragment), "{reason}");
    let diagnostic = err.diagnostic().expect("validation diagnostic");
    assert_eq!(diagnostic.code, DiagnosticCode::ValidationFailure);
}

#[rstest]
fn validation_diagnostic_points_at_the_step() {
    let yaml = "theorem: a\nlhs: 0\nrhs: 0\nproof:\n  steps:\n    - by: r\n      todo: true\n";
    let err = load_program_with_source("bad.proof", yaml).expect_err("two justifications");
    let location = err
        .diagnostic()
        .and_then(|d| d.location.as_ref())
        .expect("step location");
    assert_eq!(location.source, "bad.proof");
    assert!(location.line > 4, "{location}");
}

#[rstest]
fn parse_diagnostic_names_the_source() {
    let err = load_program_with_source("broken.proof", "define: a\nlhs: 0\nrhs: 0\nlhz: 0\n")
        .expect_err("unknown key");
    let diagnostic = err.diagnostic().expect("parse diagnostic");
    assert_eq!(diagnostic.code, DiagnosticCode::ParseFailure);
    let location = diagnostic.location.as_ref().expect("location");
    assert_eq!(location.source, "broken.proof");
    assert!(location.line > 0);
}

#[rstest]
fn load_options_reads_policies() {
    let options = load_options("on_failure: continue\n").expect("should parse");
    assert_eq!(options.on_failure, FailurePolicy::Continue);
    assert_eq!(options.proof_marks, MarkPolicy::Reject);
    assert_eq!(load_options("").ok(), Some(VerifyOptions::default()));
}

#[rstest]
#[case::unknown_key("on_falure: continue\n")]
#[case::unknown_value("proof_marks: last\n")]
fn load_options_rejects_unknown_settings(#[case] yaml: &str) {
    assert!(matches!(
        load_options(yaml),
        Err(DocumentError::Deserialize { .. })
    ));
}
