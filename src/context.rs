// src/context.rs

pub const APP_ID: &str = "applicant-intake";
pub const APP_TITLE: &str = "Job Application";

#[derive(Debug)]
pub struct AppCtx {
    pub debug_ui: bool,
}

impl AppCtx {
    pub fn from_env() -> Self {
        let debug_ui = std::env::var("INTAKE_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self { debug_ui }
    }
}
