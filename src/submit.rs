// src/submit.rs

use crate::error::{AppError, AppResult};
use crate::form::{build_application_record, validate_subset, FormState, ValidationCtx};
use serde_json::Value as JsonValue;

/// Where the submission stands. `Succeeded` is terminal; `Failed` keeps the
/// entered data and allows retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

/// External delivery collaborator. The concrete transport (API call, message
/// queue, email relay) lives behind this seam.
pub trait SubmissionSink {
    fn deliver(&mut self, record: &JsonValue) -> AppResult<()>;
}

/// Placeholder transport: logs the record and reports success.
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn deliver(&mut self, record: &JsonValue) -> AppResult<()> {
        tracing::info!(fields = record.as_object().map(|o| o.len()).unwrap_or(0),
            "application record handed off");
        Ok(())
    }
}

/// Final submit: validate everything, and only on a fully clean record invoke
/// the sink, exactly once. Validation failures land in the per-field error map
/// and the sink is not called. A sink failure preserves all entered data for
/// retry. Returns the delivered record.
pub fn submit(
    state: &mut FormState,
    ctx: &ValidationCtx,
    sink: &mut dyn SubmissionSink,
) -> AppResult<JsonValue> {
    if state.submission == SubmissionState::Succeeded {
        return Err(AppError::AlreadySubmitted);
    }

    // Same validation path as step gating, over the full field set.
    let failures = validate_subset(&state.values, state.schema.all_fields(), ctx);
    state.errors.clear();
    let failing = failures.len();
    for (key, msg) in failures {
        state.errors.insert(key, msg);
    }
    if failing > 0 {
        tracing::debug!(failing, "final submit blocked by validation");
        return Err(AppError::ApplicationIncomplete { failing });
    }

    let record = build_application_record(state);
    state.submission = SubmissionState::Pending;
    tracing::info!("submitting application");

    match sink.deliver(&record) {
        Ok(()) => {
            state.submission = SubmissionState::Succeeded;
            tracing::info!("application submitted");
            Ok(record)
        }
        Err(e) => {
            let detail = e.to_string();
            state.submission = SubmissionState::Failed(detail.clone());
            tracing::warn!(error = %detail, "submission sink failed");
            Err(AppError::SubmissionFailed(detail))
        }
    }
}

// ======================================================
// Unit Tests
// ======================================================
