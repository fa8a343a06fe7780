// tests/submission.rs

mod common;

use applicant_intake_lib::error::AppError;
use applicant_intake_lib::form::set_field;
use applicant_intake_lib::submit::{submit, SubmissionState};
use common::{fill_all, fixed_ctx, new_form, RecordingSink};

#[test]
fn submit_blocks_on_invalid_record_without_touching_the_sink() {
    let ctx = fixed_ctx();
    let mut state = new_form();
    let mut sink = RecordingSink::new();

    fill_all(&mut state, &ctx);
    set_field(&mut state, "email", serde_json::Value::Null, &ctx).unwrap();

    let err = submit(&mut state, &ctx, &mut sink).unwrap_err();
    assert!(matches!(err, AppError::ApplicationIncomplete { failing: 1 }));
    assert_eq!(sink.calls, 0);
    assert!(state.errors.contains_key("email"));
    assert_eq!(state.submission, SubmissionState::Idle);
}

#[test]
fn successful_submit_is_exactly_once() {
    let ctx = fixed_ctx();
    let mut state = new_form();
    let mut sink = RecordingSink::new();

    fill_all(&mut state, &ctx);

    submit(&mut state, &ctx, &mut sink).expect("submit");
    assert_eq!(sink.calls, 1);

    let err = submit(&mut state, &ctx, &mut sink).unwrap_err();
    assert!(matches!(err, AppError::AlreadySubmitted));
    assert_eq!(sink.calls, 1);
}

#[test]
fn failed_delivery_preserves_answers_and_allows_retry() {
    let ctx = fixed_ctx();
    let mut state = new_form();
    let mut sink = RecordingSink::new();
    sink.fail_next = true;

    fill_all(&mut state, &ctx);
    let entered = state.values.clone();

    let err = submit(&mut state, &ctx, &mut sink).unwrap_err();
    assert!(matches!(err, AppError::SubmissionFailed(_)));
    assert!(matches!(state.submission, SubmissionState::Failed(_)));

    // Nothing the user typed is lost.
    assert_eq!(state.values, entered);

    // The retry delivers the same answers.
    let record = submit(&mut state, &ctx, &mut sink).expect("retry");
    assert_eq!(sink.calls, 2);
    assert_eq!(state.submission, SubmissionState::Succeeded);
    assert_eq!(record["email"], "jane.doe@example.com");
}

#[test]
fn fixing_the_record_after_a_blocked_submit_goes_through() {
    let ctx = fixed_ctx();
    let mut state = new_form();
    let mut sink = RecordingSink::new();

    fill_all(&mut state, &ctx);
    set_field(&mut state, "annualSalary", serde_json::json!(0), &ctx).unwrap();

    let err = submit(&mut state, &ctx, &mut sink).unwrap_err();
    assert!(matches!(err, AppError::ApplicationIncomplete { .. }));

    set_field(&mut state, "annualSalary", serde_json::json!(85000), &ctx).unwrap();
    submit(&mut state, &ctx, &mut sink).expect("submit");
    assert_eq!(sink.calls, 1);
}
