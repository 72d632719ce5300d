use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::Session;

const SMOKERS_FILL: Color32 = Color32::from_rgb(156, 39, 128);
const NONSMOKERS_FILL: Color32 = Color32::from_rgb(22, 128, 120);

/// The two feed aggregate boxes, side by side.
pub fn value_boxes(ui: &mut Ui, session: &Session) {
    let summary = &session.feed_summary;
    ui.columns(2, |cols| {
        value_box(&mut cols[0], "Smokers' Total Expenditure", &summary.smokers, SMOKERS_FILL);
        value_box(&mut cols[1], "Non-Smokers' Total Expenditure", &summary.nonsmokers, NONSMOKERS_FILL);
    });
}

fn value_box(ui: &mut Ui, title: &str, value: &str, fill: Color32) {
    egui::Frame::group(ui.style())
        .fill(fill)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui: &mut Ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(title).color(Color32::WHITE));
            ui.label(RichText::new(value).color(Color32::WHITE).size(28.0).strong());
        });
}
