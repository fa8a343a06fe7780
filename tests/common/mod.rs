// tests/common/mod.rs

#![allow(dead_code)]

use applicant_intake_lib::error::{AppError, AppResult};
use applicant_intake_lib::form::{set_field, FormState, ValidationCtx};
use applicant_intake_lib::submit::SubmissionSink;
use chrono::NaiveDate;
use serde_json::{json, Value as JsonValue};

/// Fixed "today" so date-relative rules are deterministic under test.
pub fn fixed_ctx() -> ValidationCtx {
    ValidationCtx::fixed(NaiveDate::from_ymd_opt(2026, 8, 7).expect("valid date"))
}

pub fn new_form() -> FormState {
    applicant_intake_lib::new_form_state()
}

fn set_all(state: &mut FormState, ctx: &ValidationCtx, pairs: &[(&str, JsonValue)]) {
    for (key, value) in pairs {
        set_field(state, key, value.clone(), ctx).expect("set field");
    }
}

/// Step 1 — every required personal field, valid.
pub fn fill_personal(state: &mut FormState, ctx: &ValidationCtx) {
    set_all(
        state,
        ctx,
        &[
            ("firstName", json!("Jane")),
            ("lastName", json!("Doe")),
            ("email", json!("jane.doe@example.com")),
            ("phone", json!("5551234567")),
            ("address", json!("12 Harbor Lane")),
            ("city", json!("Boston")),
            ("state", json!("massachusetts")),
            ("zip", json!("02101")),
            ("availableFrom", json!("2026-09-01")),
            ("nationality", json!("Portuguese")),
            ("linkedin", json!("https://linkedin.com/in/janedoe")),
        ],
    );
}

/// Step 2 — education.
pub fn fill_education(state: &mut FormState, ctx: &ValidationCtx) {
    set_all(
        state,
        ctx,
        &[
            ("degree", json!("BSc Computer Science")),
            ("institution", json!("Boston University")),
            ("graduationYear", json!(2021)),
        ],
    );
}

/// Step 3 — work eligibility.
pub fn fill_eligibility(state: &mut FormState, ctx: &ValidationCtx) {
    set_all(
        state,
        ctx,
        &[
            ("position", json!("Software Developer")),
            ("yearsOfExperience", json!(4)),
            ("visaType", json!("OPT")),
            ("eadStartDate", json!("2026-01-15")),
            ("eadEndDate", json!("2028-01-14")),
        ],
    );
}

/// Step 4 — preferences, taking the unconditional branch of `applyIfLess`.
pub fn fill_preferences(state: &mut FormState, ctx: &ValidationCtx) {
    set_all(
        state,
        ctx,
        &[
            ("jobType", json!("full")),
            ("contractType", json!("yes")),
            ("preferredPositions", json!("Software Developer, Project Manager")),
            ("annualSalary", json!(90000)),
            ("applyIfLess", json!("yes")),
        ],
    );
}

/// Step 5 — demographics & messages.
pub fn fill_demographics(state: &mut FormState, ctx: &ValidationCtx) {
    set_all(
        state,
        ctx,
        &[
            ("gender", json!("female")),
            ("isHispanic", json!("no")),
            ("race", json!("White")),
            ("isVeteran", json!("no")),
            ("hasDisability", json!("no")),
            ("messageToHM", json!("Looking forward to contributing.")),
            ("messageToSpecialist", json!("Available for interviews any weekday.")),
        ],
    );
}

/// Fill every step with valid answers.
pub fn fill_all(state: &mut FormState, ctx: &ValidationCtx) {
    fill_personal(state, ctx);
    fill_education(state, ctx);
    fill_eligibility(state, ctx);
    fill_preferences(state, ctx);
    fill_demographics(state, ctx);
}

/// Counting sink; can be primed to fail the next delivery.
pub struct RecordingSink {
    pub calls: usize,
    pub fail_next: bool,
    pub last_record: Option<JsonValue>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            calls: 0,
            fail_next: false,
            last_record: None,
        }
    }
}

impl SubmissionSink for RecordingSink {
    fn deliver(&mut self, record: &JsonValue) -> AppResult<()> {
        self.calls += 1;
        if self.fail_next {
            self.fail_next = false;
            return Err(AppError::Msg("transport unreachable".to_string()));
        }
        self.last_record = Some(record.clone());
        Ok(())
    }
}
