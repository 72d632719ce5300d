use chrono::DateTime;
use eframe::egui::Ui;
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::color::trend_color;
use crate::data::model::Smoker;
use crate::feed::buffer::SyntheticRecord;
use crate::state::{Session, TrendTab};
use crate::stats::catmull_rom;

const SPLINE_SAMPLES: usize = 12;
const CHART_HEIGHT: f32 = 260.0;

/// `[unix seconds, expenditure]` for records whose timestamp parses.
pub fn trend_points<'a>(records: impl Iterator<Item = &'a SyntheticRecord>) -> Vec<[f64; 2]> {
    records
        .filter_map(|r| {
            let ts = r.parsed_timestamp()?;
            Some([ts.and_utc().timestamp() as f64, r.expenditure])
        })
        .collect()
}

fn clock_label(secs: f64) -> String {
    DateTime::from_timestamp(secs.round() as i64, 0)
        .map(|dt| dt.naive_utc().format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tabbed trend charts
// ---------------------------------------------------------------------------

pub fn trend_tabs(ui: &mut Ui, session: &mut Session) {
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut session.trend_tab, TrendTab::Smokers, "Smokers Trend");
        ui.selectable_value(&mut session.trend_tab, TrendTab::NonSmokers, "Non-Smokers Trend");
    });
    ui.separator();

    let smoker = session.trend_tab.smoker();
    let title = match smoker {
        Smoker::Yes => "Smokers' Expenditure Over Time",
        Smoker::No => "Non-Smokers' Expenditure Over Time",
    };
    let (held, capacity) = session.feed_fill();
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(title);
        ui.weak(format!("({held}/{capacity} latest updates)"));
    });

    if session.feed_is_empty() {
        ui.label("Waiting for the first feed update…");
        return;
    }

    let knots = trend_points(session.feed_records(smoker));
    let curve = catmull_rom(&knots, SPLINE_SAMPLES);
    let color = trend_color(smoker);

    Plot::new(("trend", smoker.label()))
        .x_axis_label("Time")
        .y_axis_label("Expenditure ($)")
        .x_axis_formatter(|mark, _range| clock_label(mark.value))
        .label_formatter(|_name, point| {
            format!("{}\n${:.1}", clock_label(point.x), point.y)
        })
        .height(CHART_HEIGHT)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(curve))
                    .name(title)
                    .color(color)
                    .width(2.0),
            );
            plot_ui.points(Points::new(PlotPoints::from(knots)).color(color).radius(3.0));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_points_skip_unparseable_timestamps() {
        let records = [
            SyntheticRecord {
                expenditure: 120.5,
                timestamp: "1970-01-01 00:01:40".into(),
                smoker: Smoker::Yes,
            },
            SyntheticRecord {
                expenditure: 999.0,
                timestamp: "not a time".into(),
                smoker: Smoker::Yes,
            },
        ];
        assert_eq!(trend_points(records.iter()), vec![[100.0, 120.5]]);
    }

    #[test]
    fn clock_label_shows_time_of_day() {
        assert_eq!(clock_label(3_661.0), "01:01:01");
    }
}
