// src/form/types.rs

use crate::schema::FormSchema;
use crate::submit::SubmissionState;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Full state of one running application form: the schema, the values entered
/// so far, the per-field error messages currently on display, the active step,
/// and where the submission stands.
///
/// One user session owns exactly one `FormState`; nothing here is shared.
#[derive(Debug, Clone)]
pub struct FormState {
    pub schema: FormSchema,

    /// Current field values, keyed by field name. Absent means "not entered".
    pub values: BTreeMap<String, JsonValue>,

    /// Per-field validation failures, keyed by field name.
    pub errors: BTreeMap<String, String>,

    /// Active step, 0-based. Terminal step is `schema.step_count() - 1`.
    pub step_index: usize,

    pub submission: SubmissionState,
}

#[derive(Debug)]
pub enum FormError {
    InvalidState(String),
    UnknownField(String),
    SchemaProblem(String),
    InputProblem(String),
    InvalidStepIndex {
        step_index: usize,
        step_count: usize,
    },
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::InvalidState(msg) => write!(f, "{msg}"),
            FormError::UnknownField(key) => write!(f, "unknown field: {key}"),
            FormError::SchemaProblem(msg) => write!(f, "schema error: {msg}"),
            FormError::InputProblem(msg) => write!(f, "{msg}"),
            FormError::InvalidStepIndex {
                step_index,
                step_count,
            } => {
                write!(f, "invalid step index {step_index}; step_count={step_count}")
            }
        }
    }
}

impl std::error::Error for FormError {}
