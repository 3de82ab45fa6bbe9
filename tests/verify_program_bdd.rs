//! Behaviour-driven tests for verifying whole programs.
//!
//! These tests use `rstest` parameterization to express Given/When/Then
//! acceptance criteria for programs loaded from fixture files.

use eqproof::diagnostic::DiagnosticCode;
use eqproof::{
    FailurePolicy, Program, ProofError, Report, VerifyOptions, load_program_with_source,
    verify_program,
};
use rstest::rstest;
use test_helpers::{fixture_source, load_fixture};

fn load(fixture: &str) -> Program {
    load_program_with_source(&fixture_source(fixture), &load_fixture(fixture))
        .unwrap_or_else(|e| panic!("{fixture} should load: {e}"))
}

fn verify(fixture: &str) -> Report {
    verify_program(&load(fixture), &VerifyOptions::default())
}

// ── Given a correct program, every declaration verifies ─────────────

#[rstest]
#[case::induction("valid_arithmetic.proof", 5, 4)]
#[case::explicit_start("valid_explicit_start.proof", 2, 1)]
#[case::todo("valid_todo.proof", 2, 2)]
fn given_a_correct_program_when_verified_then_all_declarations_pass(
    #[case] fixture: &str,
    #[case] verified: usize,
    #[case] registered: usize,
) {
    let report = verify(fixture);
    assert!(
        report.is_success(),
        "expected {fixture} to verify, got: {:?}",
        report.failures
    );
    assert_eq!(report.verified, verified);
    assert_eq!(report.registry.len(), registered);
}

#[test]
fn given_the_induction_program_when_verified_then_theorems_are_registered_in_order() {
    let registry = verify("valid_arithmetic.proof")
        .into_result()
        .expect("program verifies");
    let names: Vec<&str> = registry.iter().map(|rule| rule.name.as_str()).collect();
    assert_eq!(names, ["add_zero", "add_succ", "add_x_zero", "add_x_succ"]);
    let add_x_zero = registry.find("add_x_zero").expect("registered");
    assert_eq!(add_x_zero.to_string(), "add_x_zero <x> (add x 0) = x");
}

// ── Given a faulty program, the failure names its cause ─────────────

#[rstest]
#[case::unknown_rule("invalid_unknown_rule.proof", DiagnosticCode::UnknownRule)]
#[case::duplicate_rule("invalid_duplicate_rule.proof", DiagnosticCode::DuplicateRuleName)]
#[case::sibling_marks("invalid_sibling_marks.proof", DiagnosticCode::Structural)]
#[case::target_mismatch("invalid_target_mismatch.proof", DiagnosticCode::TargetMismatch)]
fn given_a_faulty_program_when_verified_then_the_failure_is_classified(
    #[case] fixture: &str,
    #[case] code: DiagnosticCode,
) {
    let report = verify(fixture);
    let failure = report.failures.first().expect("one failure");
    assert_eq!(failure.kind.code(), code, "{failure}");
    assert_eq!(failure.diagnostic().code, code);
}

#[test]
fn given_a_duplicate_definition_when_verified_then_the_first_one_stays() {
    let report = verify("invalid_duplicate_rule.proof");
    assert_eq!(report.registry.len(), 1);
    let rule = report.registry.find("add_zero").expect("registered");
    assert_eq!(rule.lhs.to_string(), "(add 0 b)");
}

#[test]
fn given_an_unknown_rule_when_verified_then_the_message_names_it() {
    let report = verify("invalid_unknown_rule.proof");
    let failure = report.failures.first().expect("one failure");
    assert!(matches!(
        failure.kind.root_cause(),
        ProofError::UnknownRule { name } if name == "add_one"
    ));
    assert_eq!(
        failure.to_string(),
        "example 'cites a missing rule': step 1: there is no rule named 'add_one'"
    );
}

#[test]
fn given_a_failing_step_when_diagnosed_then_the_location_is_the_step() {
    let report = verify("invalid_target_mismatch.proof");
    let failure = report.failures.first().expect("one failure");
    let declared = failure.origin.as_ref().expect("declaration location");
    let diagnostic = failure.diagnostic();
    let location = diagnostic.location.expect("step location");
    assert_eq!(location.source, fixture_source("invalid_target_mismatch.proof"));
    assert!(location.line > declared.line);
}

// ── Given several failures, the policy decides how many are seen ────

#[rstest]
#[case::abort(FailurePolicy::Abort, 1)]
#[case::continue_on(FailurePolicy::Continue, 3)]
fn given_several_faulty_declarations_when_verified_then_policy_applies(
    #[case] on_failure: FailurePolicy,
    #[case] failures: usize,
) {
    let mut program = load("invalid_unknown_rule.proof");
    program
        .declarations
        .extend(load("invalid_duplicate_rule.proof").declarations);
    let options = VerifyOptions {
        on_failure,
        ..VerifyOptions::default()
    };
    let report = verify_program(&program, &options);
    assert_eq!(report.failures.len(), failures);
}
