// src/lib.rs

pub mod context;
pub mod error;
pub mod form;
pub mod schema;
pub mod submit;

use crate::form::FormState;

/// Create the form state for one application session.
pub fn new_form_state() -> FormState {
    form::ops::new_form()
}
