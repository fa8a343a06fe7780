// src/form/nav.rs

use crate::form::types::{FormError, FormState};
use crate::form::validate::{validate_subset, ValidationCtx};
use crate::schema::SectionSpec;

/// Outcome of a forward step request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAdvance {
    /// Gate passed; the active step is now the returned index.
    Advanced(usize),
    /// Gate failed; the active step is unchanged. `first_invalid` is the
    /// first failing field in declaration order of the active step.
    Blocked { first_invalid: String },
    /// Already at the terminal step; forward motion is a no-op.
    AtEnd,
}

pub fn step_count(state: &FormState) -> usize {
    state.schema.step_count()
}

pub fn current_section(state: &FormState) -> Result<&SectionSpec, FormError> {
    state
        .schema
        .section(state.step_index)
        .ok_or(FormError::InvalidStepIndex {
            step_index: state.step_index,
            step_count: state.schema.step_count(),
        })
}

pub fn is_last_step(state: &FormState) -> bool {
    state.step_index + 1 >= state.schema.step_count()
}

/// Validate only the active step's field set and record the results in the
/// per-field error map. Fields outside the step are left untouched, so
/// not-yet-visited steps are never validated early.
pub fn validate_current_step(state: &mut FormState, ctx: &ValidationCtx) -> Result<bool, FormError> {
    let failures = {
        let section = current_section(state)?;
        validate_subset(&state.values, section.fields.iter(), ctx)
    };

    let section_keys: Vec<&'static str> = current_section(state)?
        .fields
        .iter()
        .map(|f| f.key)
        .collect();
    for key in section_keys {
        state.errors.remove(key);
    }

    let ok = failures.is_empty();
    for (key, msg) in failures {
        state.errors.insert(key, msg);
    }

    Ok(ok)
}

/// Move forward one step, gated by validation of the active step's fields.
/// At the terminal step this is a no-op.
pub fn advance_step(state: &mut FormState, ctx: &ValidationCtx) -> Result<StepAdvance, FormError> {
    if is_last_step(state) {
        return Ok(StepAdvance::AtEnd);
    }

    if !validate_current_step(state, ctx)? {
        let first_invalid = first_invalid_field(state)?
            .ok_or_else(|| FormError::InvalidState("gate failed with no recorded error".into()))?;
        tracing::debug!(step = state.step_index, %first_invalid, "step advance blocked");
        return Ok(StepAdvance::Blocked { first_invalid });
    }

    state.step_index += 1;
    tracing::debug!(step = state.step_index, "advanced to step");
    Ok(StepAdvance::Advanced(state.step_index))
}

/// Move back one step, ungated. At the first step this is a no-op.
pub fn back_step(state: &mut FormState) -> usize {
    state.step_index = state.step_index.saturating_sub(1);
    state.step_index
}

/// Deterministic tie-break for focus: the first field in declaration order of
/// the active step that currently carries an error.
pub fn first_invalid_field(state: &FormState) -> Result<Option<String>, FormError> {
    let section = current_section(state)?;
    Ok(section
        .fields
        .iter()
        .find(|f| state.errors.contains_key(f.key))
        .map(|f| f.key.to_string()))
}

// ======================================================
// Unit Tests
// ======================================================
