// src/ui/widgets.rs

use applicant_intake_lib::form::effective_required;
use applicant_intake_lib::schema::FieldSpec;
use eframe::egui;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(255, 60, 60);

/// Label row for a field: the label text plus a red asterisk when the field
/// is currently required (including conditionally required).
pub fn field_label(
    ui: &mut egui::Ui,
    spec: &FieldSpec,
    values: &BTreeMap<String, JsonValue>,
) {
    ui.horizontal(|ui| {
        ui.label(spec.label);
        if effective_required(spec, values) {
            ui.label(egui::RichText::new("*").color(ERROR_RED).small());
        }
    });
}

/// Inline validation failure, rendered under the offending control.
pub fn inline_error(ui: &mut egui::Ui, msg: &str) {
    ui.label(egui::RichText::new(msg).color(ERROR_RED).small());
}

/// "N of M character(s) left" caption for counter-bound textareas.
pub fn counter_caption(ui: &mut egui::Ui, used: usize, max: usize) {
    let remaining = max.saturating_sub(used);
    ui.label(
        egui::RichText::new(format!("{remaining} of {max} character(s) left"))
            .small()
            .weak(),
    );
}

pub fn ui_notice(ui: &mut egui::Ui, body: &str) {
    let accent = egui::Color32::from_rgb(255, 215, 90);

    let stroke = egui::Stroke::new(1.5, accent);
    let fill = egui::Color32::from_rgba_unmultiplied(accent.r(), accent.g(), accent.b(), 48);

    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .stroke(stroke)
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new("Notice")
                    .size(18.0)
                    .strong()
                    .color(accent),
            );
            ui.add_space(4.0);
            ui.label(body);
        });
}
