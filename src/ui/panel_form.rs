// src/ui/panel_form.rs

use crate::ui::message::PanelMsgState;
use crate::ui::widgets::{counter_caption, field_label, inline_error, ui_notice};
use eframe::egui;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use applicant_intake_lib::context::AppCtx;
use applicant_intake_lib::error::AppError;
use applicant_intake_lib::form::{
    self as form, effective_required, FormState, StepAdvance, ValidationCtx,
};
use applicant_intake_lib::schema::{FieldKind, FieldSpec};
use applicant_intake_lib::submit::{submit, SubmissionSink};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PanelMode {
    EditSteps,
    Submitted,
}

pub struct FormPanel {
    msg: PanelMsgState,

    mode: PanelMode,

    // raw text buffers for inputs that are edited as text
    input_buf: BTreeMap<String, String>,

    // field to focus on the next frame (first failure after a blocked gate)
    focus_field: Option<String>,

    record_out: String,
}

impl FormPanel {
    pub fn new() -> Self {
        Self {
            msg: PanelMsgState::default(),
            mode: PanelMode::EditSteps,
            input_buf: BTreeMap::new(),
            focus_field: None,
            record_out: String::new(),
        }
    }

    pub fn reset_inputs(&mut self) {
        self.mode = PanelMode::EditSteps;
        self.input_buf.clear();
        self.focus_field = None;
        self.record_out.clear();
        self.msg.clear();
    }

    pub fn clear_messages(&mut self) {
        self.msg.clear();
    }

    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut FormState,
        app_ctx: &AppCtx,
        sink: &mut dyn SubmissionSink,
    ) {
        ui.heading("Job Application");
        ui.add_space(6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                self.msg.show(ui, app_ctx.debug_ui);
                ui.add_space(6.0);

                // Borrow-splitting: do not call any &mut self methods while
                // the per-field buffers are handed out below.
                let msg = &mut self.msg;
                let input_buf = &mut self.input_buf;
                let focus_field = &mut self.focus_field;
                let record_out = &mut self.record_out;
                let mode = &mut self.mode;

                match *mode {
                    PanelMode::EditSteps => {
                        Self::ui_edit_steps_impl(
                            ui,
                            msg,
                            input_buf,
                            focus_field,
                            record_out,
                            mode,
                            state,
                            sink,
                        );
                    }
                    PanelMode::Submitted => {
                        Self::ui_submitted_impl(ui, record_out);
                    }
                }
            });
    }

    fn ui_edit_steps_impl(
        ui: &mut egui::Ui,
        msg: &mut PanelMsgState,
        input_buf: &mut BTreeMap<String, String>,
        focus_field: &mut Option<String>,
        record_out: &mut String,
        mode: &mut PanelMode,
        state: &mut FormState,
        sink: &mut dyn SubmissionSink,
    ) {
        let vctx = ValidationCtx::now();

        let step_count = form::step_count(state);
        let section_title = form::current_section(state)
            .map(|s| s.title)
            .unwrap_or("(unknown)");

        // Progress header + nav.
        ui.group(|ui| {
            ui.label(format!(
                "Step {}/{} — {}",
                state.step_index + 1,
                step_count,
                section_title
            ));

            ui.add_space(6.0);

            let at_last = form::is_last_step(state);
            let can_back = state.step_index > 0;

            ui.horizontal(|ui| {
                let button_height = 32.0;

                let back_btn = egui::Button::new(egui::RichText::new("← Back").size(16.0))
                    .min_size(egui::vec2(100.0, button_height));

                if ui.add_enabled(can_back, back_btn).clicked() {
                    form::back_step(state);
                    msg.clear();
                }

                ui.add_space(8.0);

                if at_last {
                    let submit_btn = egui::Button::new(egui::RichText::new("Submit").size(16.0))
                        .min_size(egui::vec2(120.0, button_height));

                    if ui.add(submit_btn).clicked() {
                        match submit(state, &vctx, sink) {
                            Ok(record) => {
                                *record_out = serde_json::to_string_pretty(&record)
                                    .unwrap_or_else(|_| record.to_string());
                                *mode = PanelMode::Submitted;
                                msg.set_success("Application submitted.");
                            }
                            Err(e) => {
                                if matches!(e, AppError::ApplicationIncomplete { .. }) {
                                    *focus_field =
                                        form::first_invalid_field(state).ok().flatten();
                                }
                                msg.from_app_error(&e);
                            }
                        }
                    }
                } else {
                    let next_btn = egui::Button::new(egui::RichText::new("Next →").size(16.0))
                        .min_size(egui::vec2(120.0, button_height));

                    if ui.add(next_btn).clicked() {
                        match form::advance_step(state, &vctx) {
                            Ok(StepAdvance::Advanced(_)) => {
                                msg.clear();
                                *focus_field = None;
                            }
                            Ok(StepAdvance::Blocked { first_invalid }) => {
                                *focus_field = Some(first_invalid);
                                msg.set_warn("Please fix the highlighted fields.");
                            }
                            Ok(StepAdvance::AtEnd) => {}
                            Err(e) => msg.set_error(format!("{e}")),
                        }
                    }
                }
            });
        });

        ui.add_space(8.0);

        // Centerpiece: the active section's field group, rendered from the
        // schema. Errors come from the controller; nothing is validated here.
        let specs: Vec<FieldSpec> = match form::current_section(state) {
            Ok(s) => s.fields.clone(),
            Err(e) => {
                msg.set_error(format!("{e}"));
                return;
            }
        };

        for spec in specs.iter() {
            // Conditionally required companions stay hidden until triggered.
            if spec.required_if.is_some() && !effective_required(spec, &state.values) {
                continue;
            }

            ui.group(|ui| {
                field_label(ui, spec, &state.values);
                Self::ui_field_input(ui, msg, input_buf, focus_field, state, spec, &vctx);

                if let Some(err) = state.errors.get(spec.key) {
                    inline_error(ui, err);
                }
            });

            ui.add_space(6.0);
        }
    }

    fn ui_field_input(
        ui: &mut egui::Ui,
        msg: &mut PanelMsgState,
        input_buf: &mut BTreeMap<String, String>,
        focus_field: &mut Option<String>,
        state: &mut FormState,
        spec: &FieldSpec,
        vctx: &ValidationCtx,
    ) {
        let key = spec.key;
        let wants_focus = focus_field.as_deref() == Some(key);

        match spec.kind {
            FieldKind::Text | FieldKind::Number | FieldKind::Int | FieldKind::Date => {
                let buf = input_buf
                    .entry(key.to_string())
                    .or_insert_with(|| current_value_string(state, key));

                let mut edit = egui::TextEdit::singleline(buf);
                if spec.kind == FieldKind::Date {
                    edit = edit.hint_text("YYYY-MM-DD");
                }

                let resp = ui.add(edit);
                if wants_focus {
                    resp.request_focus();
                    *focus_field = None;
                }

                if resp.changed() {
                    let result = match spec.kind {
                        FieldKind::Number => form::set_field_number(state, key, buf, vctx),
                        FieldKind::Int => form::set_field_int(state, key, buf, vctx),
                        _ => form::set_field_text(state, key, buf, vctx),
                    };
                    if let Err(e) = result {
                        msg.set_warn(format!("{e}"));
                    }
                }
            }

            FieldKind::Multiline => {
                let buf = input_buf
                    .entry(key.to_string())
                    .or_insert_with(|| current_value_string(state, key));

                let max = spec.max_chars();

                let mut edit = egui::TextEdit::multiline(buf).desired_rows(4);
                if let Some(n) = max {
                    // Truncation policy: the widget refuses input past the
                    // budget; the schema's max_len rule is the backstop.
                    edit = edit.char_limit(n);
                }

                let resp = ui.add(edit);
                if wants_focus {
                    resp.request_focus();
                    *focus_field = None;
                }

                if let Some(n) = max {
                    counter_caption(ui, buf.chars().count(), n);
                }

                if resp.changed() {
                    if let Err(e) = form::set_field_text(state, key, buf, vctx) {
                        msg.set_warn(format!("{e}"));
                    }
                }
            }

            FieldKind::Select => {
                let choices = spec.choices.unwrap_or_default();
                let cur = current_value_string(state, key);

                let combo = egui::ComboBox::from_id_salt(format!("select_{key}"))
                    .selected_text(if cur.is_empty() {
                        "(select)".to_string()
                    } else {
                        cur.clone()
                    });

                let resp = combo.show_ui(ui, |ui| {
                    for c in choices.iter() {
                        if ui.selectable_label(cur == *c, *c).clicked() {
                            if let Err(e) = form::set_field(
                                state,
                                key,
                                JsonValue::String((*c).to_string()),
                                vctx,
                            ) {
                                msg.set_warn(format!("{e}"));
                            }
                        }
                    }
                });

                if wants_focus {
                    resp.response.request_focus();
                    *focus_field = None;
                }
            }
        }
    }

    fn ui_submitted_impl(ui: &mut egui::Ui, record_out: &mut String) {
        ui_notice(
            ui,
            "Your application has been submitted. A copy of the record that was \
handed to the delivery service is shown below.",
        );

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Submitted record:");

            let copy_btn = ui.small_button("⧉").on_hover_text("Copy record JSON");
            if copy_btn.clicked() {
                ui.ctx().copy_text(record_out.clone());
            }
        });

        ui.add(
            egui::TextEdit::multiline(record_out)
                .desired_rows(16)
                .code_editor()
                .interactive(false),
        );
    }
}

fn current_value_string(state: &FormState, key: &str) -> String {
    match state.values.get(key) {
        Some(JsonValue::String(s)) => s.clone(),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}
