// src/form/ops.rs

use crate::form::types::{FormError, FormState};
use crate::form::validate::{validate_single, ValidationCtx};
use crate::schema::full_schema;
use crate::submit::SubmissionState;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::BTreeMap;

/// Create an empty application form at the first step.
pub fn new_form() -> FormState {
    FormState {
        schema: full_schema(),
        values: BTreeMap::new(),
        errors: BTreeMap::new(),
        step_index: 0,
        submission: SubmissionState::Idle,
    }
}

/// Set a field value and revalidate it together with every field whose
/// requirement depends on it. Passing `Null` clears the field.
pub fn set_field(
    state: &mut FormState,
    key: &str,
    value: JsonValue,
    ctx: &ValidationCtx,
) -> Result<(), FormError> {
    let key = key.trim();
    if state.schema.field(key).is_none() {
        return Err(FormError::UnknownField(key.to_string()));
    }

    if value.is_null() {
        state.values.remove(key);
    } else {
        state.values.insert(key.to_string(), value);
    }

    revalidate_touched(state, key, ctx);
    Ok(())
}

/// Re-run validation for the named field and its dependents, keeping the
/// error map in sync. Only fields that already carry an error, or that just
/// changed, are touched; untouched fields keep their reported state.
fn revalidate_touched(state: &mut FormState, key: &str, ctx: &ValidationCtx) {
    let mut touched: Vec<&'static str> = Vec::new();
    if let Some(spec) = state.schema.field(key) {
        touched.push(spec.key);
    }
    for dep in state.schema.dependents_of(key) {
        touched.push(dep.key);
    }

    for k in touched {
        let spec = match state.schema.field(k) {
            Some(s) => s,
            None => continue,
        };
        match validate_single(&state.values, spec, ctx) {
            Some(msg) => {
                // A dependent that was never shown an error stays silent until
                // a gate or submit reports it; a visible error is kept fresh.
                if k == key || state.errors.contains_key(k) {
                    state.errors.insert(k.to_string(), msg);
                }
            }
            None => {
                state.errors.remove(k);
            }
        }
    }
}

/// Convenience for text-editing widgets: store the raw string, mapping an
/// empty buffer to "cleared".
pub fn set_field_text(
    state: &mut FormState,
    key: &str,
    raw: &str,
    ctx: &ValidationCtx,
) -> Result<(), FormError> {
    let value = if raw.is_empty() {
        JsonValue::Null
    } else {
        JsonValue::String(raw.to_string())
    };
    set_field(state, key, value, ctx)
}

/// Convenience for numeric widgets: parse the buffer, storing the raw text on
/// parse failure so validation can report the type problem.
pub fn set_field_number(
    state: &mut FormState,
    key: &str,
    raw: &str,
    ctx: &ValidationCtx,
) -> Result<(), FormError> {
    let s = raw.trim();
    let value = if s.is_empty() {
        JsonValue::Null
    } else if let Some(n) = s.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        JsonValue::Number(n)
    } else {
        JsonValue::String(s.to_string())
    };
    set_field(state, key, value, ctx)
}

/// Convenience for integer widgets, same policy as [`set_field_number`].
pub fn set_field_int(
    state: &mut FormState,
    key: &str,
    raw: &str,
    ctx: &ValidationCtx,
) -> Result<(), FormError> {
    let s = raw.trim();
    let value = if s.is_empty() {
        JsonValue::Null
    } else if let Ok(n) = s.parse::<i64>() {
        JsonValue::Number(n.into())
    } else {
        JsonValue::String(s.to_string())
    };
    set_field(state, key, value, ctx)
}

/// Build the flat Application record handed to the submission sink: one JSON
/// object, schema declaration order, entered fields only. The caller is
/// responsible for having validated the record first.
pub fn build_application_record(state: &FormState) -> JsonValue {
    let mut record = JsonMap::new();
    for spec in state.schema.all_fields() {
        if let Some(v) = state.values.get(spec.key) {
            record.insert(spec.key.to_string(), v.clone());
        }
    }
    JsonValue::Object(record)
}

// ======================================================
// Unit Tests
// ======================================================
