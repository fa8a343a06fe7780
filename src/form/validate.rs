// src/form/validate.rs

use crate::form::types::FormError;
use crate::schema::{FieldKind, FieldSpec};
use chrono::{Datelike, Local, NaiveDate};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Explicit date context for "today"-relative rules. Injected rather than read
/// from the clock inside the rule interpreters, so validation stays a pure
/// function of (value, siblings, context).
#[derive(Debug, Clone, Copy)]
pub struct ValidationCtx {
    pub today: NaiveDate,
}

impl ValidationCtx {
    pub fn now() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }

    pub fn fixed(today: NaiveDate) -> Self {
        Self { today }
    }
}

trait ValidationSink {
    fn missing_required(&mut self, spec: &FieldSpec);
    fn value_error(&mut self, spec: &FieldSpec, err: FormError);

    fn stop_early(&self) -> bool;
}

struct FirstFailureSink {
    err: Option<(String, String)>,
}

impl FirstFailureSink {
    fn new() -> Self {
        Self { err: None }
    }
}

impl ValidationSink for FirstFailureSink {
    fn missing_required(&mut self, spec: &FieldSpec) {
        if self.err.is_some() {
            return;
        }
        self.err = Some((spec.key.to_string(), required_message(spec)));
    }

    fn value_error(&mut self, spec: &FieldSpec, err: FormError) {
        if self.err.is_some() {
            return;
        }
        self.err = Some((spec.key.to_string(), err.to_string()));
    }

    fn stop_early(&self) -> bool {
        true
    }
}

struct CollectSink {
    errors: Vec<(String, String)>,
}

impl CollectSink {
    fn new() -> Self {
        Self { errors: Vec::new() }
    }
}

impl ValidationSink for CollectSink {
    fn missing_required(&mut self, spec: &FieldSpec) {
        self.errors
            .push((spec.key.to_string(), required_message(spec)));
    }

    fn value_error(&mut self, spec: &FieldSpec, err: FormError) {
        self.errors.push((spec.key.to_string(), err.to_string()));
    }

    fn stop_early(&self) -> bool {
        false
    }
}

fn required_message(spec: &FieldSpec) -> String {
    format!("{} is required", spec.label)
}

/// Whether the field is required against the current record: either
/// unconditionally, or because its `required_if` peer holds the trigger value.
pub fn effective_required(spec: &FieldSpec, values: &BTreeMap<String, JsonValue>) -> bool {
    if spec.required {
        return true;
    }
    match spec.required_if {
        Some(cond) => values
            .get(cond.peer)
            .and_then(|v| v.as_str())
            .map(|s| s == cond.equals)
            .unwrap_or(false),
        None => false,
    }
}

fn is_missing(v_opt: Option<&JsonValue>) -> bool {
    match v_opt {
        None => true,
        Some(JsonValue::Null) => true,
        Some(JsonValue::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn validate_specs_against_values<'a>(
    values: &BTreeMap<String, JsonValue>,
    specs: impl Iterator<Item = &'a FieldSpec>,
    ctx: &ValidationCtx,
    sink: &mut impl ValidationSink,
) {
    for spec in specs {
        let v_opt = values.get(spec.key);

        // Required check: missing, null, or blank string all count as missing.
        if effective_required(spec, values) && is_missing(v_opt) {
            sink.missing_required(spec);
            if sink.stop_early() {
                return;
            }
            continue;
        }

        let Some(v) = v_opt else {
            continue; // optional + not provided
        };
        if is_missing(v_opt) {
            continue; // optional + blank treated as not provided
        }

        if let Err(e) = validate_field_value(spec, v, ctx) {
            sink.value_error(spec, e);
            if sink.stop_early() {
                return;
            }
        }
    }
}

/// Validate a named subset of the schema against the record, in declaration
/// order. Returns one `(field, message)` per failing field. This is the single
/// validation path for both step gating and final submission.
pub fn validate_subset<'a>(
    values: &BTreeMap<String, JsonValue>,
    specs: impl Iterator<Item = &'a FieldSpec>,
    ctx: &ValidationCtx,
) -> Vec<(String, String)> {
    let mut sink = CollectSink::new();
    validate_specs_against_values(values, specs, ctx, &mut sink);
    sink.errors
}

/// Validate a single field; `None` means valid.
pub fn validate_single(
    values: &BTreeMap<String, JsonValue>,
    spec: &FieldSpec,
    ctx: &ValidationCtx,
) -> Option<String> {
    let mut sink = FirstFailureSink::new();
    validate_specs_against_values(values, std::iter::once(spec), ctx, &mut sink);
    sink.err.map(|(_, msg)| msg)
}

/// Type-check a present value against its spec and run the validator rules.
pub fn validate_field_value(
    spec: &FieldSpec,
    v: &JsonValue,
    ctx: &ValidationCtx,
) -> Result<(), FormError> {
    match spec.kind {
        FieldKind::Text | FieldKind::Multiline => {
            let s = v.as_str().ok_or_else(|| {
                FormError::InputProblem(format!("{} must be text", spec.label))
            })?;
            apply_validators_text(spec, s)?;
        }

        FieldKind::Select => {
            let s = v.as_str().ok_or_else(|| {
                FormError::InputProblem(format!("{} must be a selection", spec.label))
            })?;
            let choices = spec.choices.ok_or_else(|| {
                FormError::SchemaProblem(format!("select field '{}' has no choices", spec.key))
            })?;
            if !choices.iter().any(|c| *c == s) {
                return Err(FormError::InputProblem(format!(
                    "{} must be one of: {}",
                    spec.label,
                    choices.join(", ")
                )));
            }
        }

        FieldKind::Number => {
            let n = v.as_f64().ok_or_else(|| {
                FormError::InputProblem(format!("{} must be a number", spec.label))
            })?;
            apply_validators_number(spec, n)?;
        }

        FieldKind::Int => {
            let n = v.as_i64().ok_or_else(|| {
                FormError::InputProblem(format!("{} must be a whole number", spec.label))
            })?;
            apply_validators_int(spec, n, ctx)?;
        }

        FieldKind::Date => {
            let s = v.as_str().ok_or_else(|| {
                FormError::InputProblem(format!("{} must be a date", spec.label))
            })?;
            let d = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
                FormError::InputProblem(format!(
                    "{} must be a date in YYYY-MM-DD format",
                    spec.label
                ))
            })?;
            apply_validators_date(spec, d, ctx)?;
        }
    }

    Ok(())
}

fn apply_validators_text(spec: &FieldSpec, s: &str) -> Result<(), FormError> {
    for rule in spec.validators {
        if let Some(pat) = rule.strip_prefix("regex:") {
            let re = regex::Regex::new(pat).map_err(|e| {
                FormError::SchemaProblem(format!("invalid regex for '{}': {}", spec.key, e))
            })?;
            if !re.is_match(s.trim()) {
                let msg = match spec.pattern_hint {
                    Some(hint) => hint.to_string(),
                    None => format!("{} is not in the expected format", spec.label),
                };
                return Err(FormError::InputProblem(msg));
            }
        } else if let Some(n) = rule.strip_prefix("min_len:") {
            let n = parse_rule_usize(spec, rule, n)?;
            if s.chars().count() < n {
                return Err(FormError::InputProblem(format!(
                    "{} must be at least {} character(s)",
                    spec.label, n
                )));
            }
        } else if let Some(n) = rule.strip_prefix("max_len:") {
            let n = parse_rule_usize(spec, rule, n)?;
            if s.chars().count() > n {
                return Err(FormError::InputProblem(format!(
                    "{} must be at most {} character(s)",
                    spec.label, n
                )));
            }
        }
    }

    Ok(())
}

fn apply_validators_number(spec: &FieldSpec, n: f64) -> Result<(), FormError> {
    for rule in spec.validators {
        if *rule == "positive" {
            if n <= 0.0 {
                return Err(FormError::InputProblem(format!(
                    "{} must be greater than 0",
                    spec.label
                )));
            }
        } else if let Some(raw) = rule.strip_prefix("min:") {
            let minv = parse_rule_f64(spec, rule, raw)?;
            if n < minv {
                return Err(FormError::InputProblem(format!(
                    "{} must be at least {}",
                    spec.label, minv
                )));
            }
        } else if let Some(raw) = rule.strip_prefix("max:") {
            let maxv = parse_rule_f64(spec, rule, raw)?;
            if n > maxv {
                return Err(FormError::InputProblem(format!(
                    "{} must be at most {}",
                    spec.label, maxv
                )));
            }
        }
    }

    Ok(())
}

fn apply_validators_int(spec: &FieldSpec, n: i64, ctx: &ValidationCtx) -> Result<(), FormError> {
    for rule in spec.validators {
        if let Some(raw) = rule.strip_prefix("min:") {
            let minv = parse_rule_i64(spec, rule, raw, ctx)?;
            if n < minv {
                return Err(FormError::InputProblem(format!(
                    "{} must be at least {}",
                    spec.label, minv
                )));
            }
        } else if let Some(raw) = rule.strip_prefix("max:") {
            let maxv = parse_rule_i64(spec, rule, raw, ctx)?;
            if n > maxv {
                return Err(FormError::InputProblem(format!(
                    "{} must be at most {}",
                    spec.label, maxv
                )));
            }
        }
    }

    Ok(())
}

fn apply_validators_date(
    spec: &FieldSpec,
    d: NaiveDate,
    ctx: &ValidationCtx,
) -> Result<(), FormError> {
    for rule in spec.validators {
        if *rule == "not_past" && d < ctx.today {
            return Err(FormError::InputProblem(format!(
                "{} cannot be in the past",
                spec.label
            )));
        }
    }

    Ok(())
}

fn parse_rule_usize(spec: &FieldSpec, rule: &str, raw: &str) -> Result<usize, FormError> {
    raw.parse::<usize>().map_err(|_| {
        FormError::SchemaProblem(format!("invalid rule for '{}': {}", spec.key, rule))
    })
}

fn parse_rule_f64(spec: &FieldSpec, rule: &str, raw: &str) -> Result<f64, FormError> {
    raw.parse::<f64>().map_err(|_| {
        FormError::SchemaProblem(format!("invalid rule for '{}': {}", spec.key, rule))
    })
}

fn parse_rule_i64(
    spec: &FieldSpec,
    rule: &str,
    raw: &str,
    ctx: &ValidationCtx,
) -> Result<i64, FormError> {
    if raw == "current_year" {
        return Ok(i64::from(ctx.today.year()));
    }
    raw.parse::<i64>().map_err(|_| {
        FormError::SchemaProblem(format!("invalid rule for '{}': {}", spec.key, rule))
    })
}

// ======================================================
// Unit Tests
// ======================================================
