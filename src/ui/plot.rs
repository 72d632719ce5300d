use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points, Polygon};

use crate::color::{gender_color, viridis};
use crate::data::model::Gender;
use crate::state::Session;
use crate::stats::{density_grid, ols_fit};

const CHART_HEIGHT: f32 = 300.0;

/// `[age, expenditure]` pairs of the visible rows, optionally for one gender.
fn age_vs_expenditure(session: &Session, gender: Option<Gender>) -> Vec<[f64; 2]> {
    session
        .visible_indices
        .iter()
        .map(|&i| &session.dataset.records[i])
        .filter(|r| gender.map_or(true, |g| r.gender == g))
        .map(|r| [r.age as f64, r.expenditure])
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter plot with one OLS trend line per gender
// ---------------------------------------------------------------------------

pub fn scatter_plot(ui: &mut Ui, session: &Session) {
    ui.strong("Scatterplot: Age vs Expenditure with Regression");

    Plot::new("scatter_age_expenditure")
        .legend(Legend::default())
        .x_axis_label("Age")
        .y_axis_label("Expenditure ($)")
        .height(CHART_HEIGHT)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for gender in Gender::ALL {
                let pts = age_vs_expenditure(session, Some(gender));
                if pts.is_empty() {
                    continue;
                }
                let color = gender_color(gender);

                if let Some(fit) = ols_fit(&pts) {
                    let (lo, hi) = pts.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                        (lo.min(p[0]), hi.max(p[0]))
                    });
                    let trend: PlotPoints = vec![[lo, fit.predict(lo)], [hi, fit.predict(hi)]].into();
                    plot_ui.line(
                        Line::new(trend)
                            .name(format!("{gender} trend"))
                            .color(color)
                            .width(2.0),
                    );
                }

                plot_ui.points(
                    Points::new(PlotPoints::from(pts))
                        .name(gender.label())
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Density heatmap
// ---------------------------------------------------------------------------

pub fn density_heatmap(ui: &mut Ui, session: &Session) {
    ui.strong("Heatmap: Age vs Expenditure");

    let (nx, ny) = session.config.heatmap_bins;
    let grid = density_grid(&age_vs_expenditure(session, None), nx, ny);

    Plot::new("heatmap_age_expenditure")
        .x_axis_label("Age")
        .y_axis_label("Expenditure ($)")
        .height(CHART_HEIGHT)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let Some(grid) = &grid else {
                return;
            };
            let max = grid.max_count.max(1) as f64;
            for (x0, x1, y0, y1, count) in grid.cells() {
                let fill = viridis(count as f64 / max);
                let cell: PlotPoints = vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]].into();
                plot_ui.polygon(
                    Polygon::new(cell)
                        .fill_color(fill)
                        .stroke(Stroke::new(0.0, Color32::TRANSPARENT))
                        .name(format!("count {count}")),
                );
            }
        });
}
