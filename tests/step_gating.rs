// tests/step_gating.rs

mod common;

use applicant_intake_lib::form::{advance_step, back_step, set_field, StepAdvance};
use common::{fill_personal, fixed_ctx, new_form};
use serde_json::json;

#[test]
fn valid_step_one_advances_to_step_two() {
    let ctx = fixed_ctx();
    let mut state = new_form();

    fill_personal(&mut state, &ctx);

    let outcome = advance_step(&mut state, &ctx).expect("advance");
    assert_eq!(outcome, StepAdvance::Advanced(1));
    assert_eq!(state.step_index, 1);
}

#[test]
fn missing_email_blocks_step_one_and_reports_it() {
    let ctx = fixed_ctx();
    let mut state = new_form();

    fill_personal(&mut state, &ctx);
    set_field(&mut state, "email", serde_json::Value::Null, &ctx).unwrap();

    let outcome = advance_step(&mut state, &ctx).expect("advance");
    assert_eq!(
        outcome,
        StepAdvance::Blocked {
            first_invalid: "email".to_string()
        }
    );
    assert_eq!(state.step_index, 0);
    assert_eq!(
        state.errors.get("email").map(String::as_str),
        Some("Email is required")
    );
}

#[test]
fn gate_checks_only_the_active_step() {
    let ctx = fixed_ctx();
    let mut state = new_form();

    // Later steps are untouched and full of required fields; step one must
    // still advance on its own merits.
    fill_personal(&mut state, &ctx);
    let outcome = advance_step(&mut state, &ctx).expect("advance");
    assert_eq!(outcome, StepAdvance::Advanced(1));
    assert!(state.errors.is_empty());
}

#[test]
fn forward_motion_stops_at_the_terminal_step() {
    let ctx = fixed_ctx();
    let mut state = new_form();
    state.step_index = 4;

    let outcome = advance_step(&mut state, &ctx).expect("advance");
    assert_eq!(outcome, StepAdvance::AtEnd);
    assert_eq!(state.step_index, 4);
}

#[test]
fn back_is_always_allowed_and_clamped() {
    let ctx = fixed_ctx();
    let mut state = new_form();

    fill_personal(&mut state, &ctx);
    advance_step(&mut state, &ctx).expect("advance");
    assert_eq!(state.step_index, 1);

    // Back ignores the (invalid) current step entirely.
    assert_eq!(back_step(&mut state), 0);
    assert_eq!(back_step(&mut state), 0);
}

#[test]
fn blocked_gate_resolves_first_failure_in_declaration_order() {
    let ctx = fixed_ctx();
    let mut state = new_form();

    // Two failures on step one: firstName precedes email in declaration order.
    fill_personal(&mut state, &ctx);
    set_field(&mut state, "firstName", json!("J"), &ctx).unwrap();
    set_field(&mut state, "email", serde_json::Value::Null, &ctx).unwrap();

    let outcome = advance_step(&mut state, &ctx).expect("advance");
    assert_eq!(
        outcome,
        StepAdvance::Blocked {
            first_invalid: "firstName".to_string()
        }
    );
}

#[test]
fn fixing_the_reported_field_unblocks_the_gate() {
    let ctx = fixed_ctx();
    let mut state = new_form();

    fill_personal(&mut state, &ctx);
    set_field(&mut state, "zip", json!("1234"), &ctx).unwrap();

    let outcome = advance_step(&mut state, &ctx).expect("advance");
    assert!(matches!(outcome, StepAdvance::Blocked { .. }));

    set_field(&mut state, "zip", json!("12345"), &ctx).unwrap();
    let outcome = advance_step(&mut state, &ctx).expect("advance");
    assert_eq!(outcome, StepAdvance::Advanced(1));
}
