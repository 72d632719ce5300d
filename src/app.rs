use std::time::Instant;

use eframe::egui::{self, ScrollArea, Ui};

use crate::state::Session;
use crate::ui::{cards, panels, plot, table, trend};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub session: Session,
}

impl DashboardApp {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Feed tick: mutate before anything renders ----
        let now = Instant::now();
        self.session.poll_feed(now);
        if let Some(wait) = self.session.next_feed_in(now) {
            ctx.request_repaint_after(wait);
        }

        // ---- Top panel: title and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.session);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.session);
            });

        // ---- Central panel: value boxes, filtered views, trends ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    cards::value_boxes(ui, &self.session);
                    ui.add_space(8.0);

                    ui.columns(3, |cols| {
                        table::data_table(&mut cols[0], &mut self.session);
                        plot::scatter_plot(&mut cols[1], &self.session);
                        plot::density_heatmap(&mut cols[2], &self.session);
                    });
                    ui.add_space(8.0);

                    trend::trend_tabs(ui, &mut self.session);
                });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.session.stop_feed();
    }
}
