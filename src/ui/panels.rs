use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{Gender, Smoker};
use crate::state::Session;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the "Filters and Options" sidebar.
pub fn side_panel(ui: &mut Ui, session: &mut Session) {
    ui.heading("Filters and Options");
    ui.separator();

    let before = session.filters.clone();
    let filters = &mut session.filters;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Gender ----
            ui.horizontal(|ui: &mut Ui| {
                ui.strong("Select Gender");
                if ui.small_button("All").clicked() {
                    filters.select_all_genders();
                }
                if ui.small_button("None").clicked() {
                    filters.select_no_genders();
                }
            });
            ui.horizontal(|ui: &mut Ui| {
                for gender in Gender::ALL {
                    let mut checked = filters.selected_gender.contains(&gender);
                    if ui.checkbox(&mut checked, gender.label()).changed() {
                        filters.toggle_gender(gender);
                    }
                }
            });
            ui.add_space(6.0);

            // ---- Smoker ----
            ui.horizontal(|ui: &mut Ui| {
                ui.strong("Smoker?");
                if ui.small_button("All").clicked() {
                    filters.select_all_smokers();
                }
                if ui.small_button("None").clicked() {
                    filters.select_no_smokers();
                }
            });
            ui.horizontal(|ui: &mut Ui| {
                for smoker in Smoker::ALL {
                    let mut checked = filters.selected_smoker.contains(&smoker);
                    if ui.checkbox(&mut checked, smoker.label()).changed() {
                        filters.toggle_smoker(smoker);
                    }
                }
            });
            ui.separator();

            // ---- Expenditure range ----
            ui.strong("Expenditure Range ($)");
            let (lo, hi) = filters.expenditure_range.bounds();
            let mut min = filters.expenditure_range.min();
            let mut max = filters.expenditure_range.max();
            if ui
                .add(egui::Slider::new(&mut min, lo..=hi).text("from").step_by(1.0))
                .changed()
            {
                filters.expenditure_range.set_min(min);
            }
            if ui
                .add(egui::Slider::new(&mut max, lo..=hi).text("to").step_by(1.0))
                .changed()
            {
                filters.expenditure_range.set_max(max);
            }
            ui.add_space(6.0);

            // ---- Age range ----
            ui.strong("Age Group");
            let (lo, hi) = filters.age_range.bounds();
            let mut min = filters.age_range.min();
            let mut max = filters.age_range.max();
            if ui.add(egui::Slider::new(&mut min, lo..=hi).text("from")).changed() {
                filters.age_range.set_min(min);
            }
            if ui.add(egui::Slider::new(&mut max, lo..=hi).text("to")).changed() {
                filters.age_range.set_max(max);
            }
        });

    if session.filters != before {
        log::debug!("Filters changed: {:?}", session.filters);
    }
    // Memoised: a no-op unless the filters changed.
    session.refilter();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with row counts and status.
pub fn top_bar(ui: &mut Ui, session: &Session) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Healthcare Expenditure Dashboard");
        ui.separator();

        ui.label(format!(
            "{} records loaded, {} visible",
            session.dataset.len(),
            session.visible_indices.len()
        ));

        if let Some(msg) = &session.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
