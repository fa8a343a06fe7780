// src/ui/mod.rs

pub mod message;
pub mod panel_form;
pub mod widgets;

use eframe::egui;

use applicant_intake_lib::context::AppCtx;
use applicant_intake_lib::form::FormState;
use applicant_intake_lib::submit::LogSink;

use panel_form::FormPanel;

pub struct UiApp {
    state: FormState,
    ctx: AppCtx,
    sink: LogSink,

    form: FormPanel,
}

impl UiApp {
    pub fn new(state: FormState, ctx: AppCtx) -> Self {
        Self {
            state,
            ctx,
            sink: LogSink,
            form: FormPanel::new(),
        }
    }
}

impl eframe::App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.form
                .ui(ui, &mut self.state, &self.ctx, &mut self.sink);
        });
    }
}
