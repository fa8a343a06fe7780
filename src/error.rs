// src/error.rs

use std::fmt;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserMsgKind {
    Success,
    Warn,
    Error,
    Info,
}

#[derive(Clone, Debug)]
pub struct UserMsg {
    pub kind: UserMsgKind,
    pub short: &'static str,
    pub detail: Option<String>,
}

#[derive(Debug)]
pub enum AppError {
    // --------------------------------------------------
    // generic / plumbing
    // --------------------------------------------------
    Msg(String),
    InvalidState(String),

    // --------------------------------------------------
    // submission
    // --------------------------------------------------
    ApplicationIncomplete { failing: usize },
    AlreadySubmitted,
    SubmissionFailed(String),
}

impl AppError {
    pub fn user_msg(&self) -> UserMsg {
        use AppError::*;

        let kind = UserMsgKind::Error;
        let detail = Some(self.to_string());

        let short: &'static str = match self {
            Msg(_) => "Operation failed.",
            InvalidState(_) => "Internal form state error.",

            ApplicationIncomplete { .. } => "Please fix the highlighted fields.",
            AlreadySubmitted => "This application was already submitted.",
            SubmissionFailed(_) => "Submission failed. Your answers are kept; please retry.",
        };

        UserMsg {
            kind,
            short,
            detail,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AppError::*;

        match self {
            Msg(s) => write!(f, "{s}"),
            InvalidState(s) => write!(f, "invalid state: {s}"),

            ApplicationIncomplete { failing } => {
                write!(
                    f,
                    "application incomplete: {failing} field(s) failed validation"
                )
            }
            AlreadySubmitted => write!(f, "application already submitted"),
            SubmissionFailed(s) => write!(f, "submission failed: {s}"),
        }
    }
}

impl std::error::Error for AppError {}
