use std::cmp::Ordering;

use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Dataset, ExpenditureRecord};
use crate::state::Session;

// ---------------------------------------------------------------------------
// Sorting & selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Age,
    Gender,
    Expenditure,
    Smoker,
    Region,
    Timestamp,
}

impl SortColumn {
    /// Same order as the file columns.
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Age,
        SortColumn::Gender,
        SortColumn::Expenditure,
        SortColumn::Smoker,
        SortColumn::Region,
        SortColumn::Timestamp,
    ];

    fn compare(self, a: &ExpenditureRecord, b: &ExpenditureRecord) -> Ordering {
        match self {
            SortColumn::Age => a.age.cmp(&b.age),
            SortColumn::Gender => a.gender.cmp(&b.gender),
            SortColumn::Expenditure => a.expenditure.total_cmp(&b.expenditure),
            SortColumn::Smoker => a.smoker.cmp(&b.smoker),
            SortColumn::Region => a.region.cmp(&b.region),
            SortColumn::Timestamp => match (a.parsed_timestamp(), b.parsed_timestamp()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => a.timestamp.cmp(&b.timestamp),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableState {
    /// Active sort: column and ascending flag.
    pub sort: Option<(SortColumn, bool)>,
    /// Dataset index of the selected row.
    pub selected_row: Option<usize>,
}

impl TableState {
    /// First click sorts ascending, the next reverses, the third clears.
    pub fn click_header(&mut self, column: SortColumn) {
        self.sort = match self.sort {
            Some((c, true)) if c == column => Some((column, false)),
            Some((c, false)) if c == column => None,
            _ => Some((column, true)),
        };
    }

    pub fn click_row(&mut self, index: usize) {
        self.selected_row = if self.selected_row == Some(index) {
            None
        } else {
            Some(index)
        };
    }
}

/// Order `indices` for display. The sort is stable so ties keep dataset order.
pub fn sorted_rows(dataset: &Dataset, indices: &[usize], sort: Option<(SortColumn, bool)>) -> Vec<usize> {
    let mut rows = indices.to_vec();
    if let Some((column, ascending)) = sort {
        rows.sort_by(|&a, &b| {
            let ord = column.compare(&dataset.records[a], &dataset.records[b]);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }
    rows
}

// ---------------------------------------------------------------------------
// Filtered data table
// ---------------------------------------------------------------------------

pub fn data_table(ui: &mut Ui, session: &mut Session) {
    ui.strong("Filtered Healthcare Expenditure Data");
    ui.separator();

    if session.visible_indices.is_empty() {
        ui.label("No rows match the current filters.");
        return;
    }

    let rows = sorted_rows(&session.dataset, &session.visible_indices, session.table.sort);
    let dataset = &session.dataset;
    let names = dataset.column_names();
    let table = &mut session.table;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(280.0)
        .sense(egui::Sense::click())
        .columns(Column::auto().at_least(60.0), names.len() - 1)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for (column, name) in SortColumn::ALL.into_iter().zip(names) {
                header.col(|ui| {
                    let arrow = match table.sort {
                        Some((c, true)) if c == column => " ▲",
                        Some((c, false)) if c == column => " ▼",
                        _ => "",
                    };
                    if ui
                        .button(RichText::new(format!("{name}{arrow}")).strong())
                        .clicked()
                    {
                        table.click_header(column);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let idx = rows[row.index()];
                let r = &dataset.records[idx];
                row.set_selected(table.selected_row == Some(idx));

                row.col(|ui| {
                    ui.label(r.age.to_string());
                });
                row.col(|ui| {
                    ui.label(r.gender.label());
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", r.expenditure));
                });
                row.col(|ui| {
                    ui.label(r.smoker.label());
                });
                row.col(|ui| {
                    ui.label(&r.region);
                });
                row.col(|ui| {
                    ui.label(&r.timestamp);
                });

                if row.response().clicked() {
                    table.click_row(idx);
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Gender, Smoker};

    fn dataset() -> Dataset {
        let rows = [
            (50, Gender::Male, 900.0, "south", "2024-01-03 00:00:00"),
            (30, Gender::Female, 2500.0, "north", "2024-01-01 00:00:00"),
            (30, Gender::Male, 1200.0, "east", "2024-01-02 00:00:00"),
        ];
        Dataset::from_records(
            rows.into_iter()
                .map(|(age, gender, expenditure, region, ts)| ExpenditureRecord {
                    age,
                    gender,
                    expenditure,
                    smoker: Smoker::No,
                    region: region.into(),
                    timestamp: ts.into(),
                })
                .collect(),
        )
    }

    #[test]
    fn unsorted_keeps_filter_order() {
        let ds = dataset();
        assert_eq!(sorted_rows(&ds, &[2, 0], None), vec![2, 0]);
    }

    #[test]
    fn sorts_by_column_both_ways() {
        let ds = dataset();
        let all = [0, 1, 2];
        assert_eq!(sorted_rows(&ds, &all, Some((SortColumn::Expenditure, true))), vec![0, 2, 1]);
        assert_eq!(sorted_rows(&ds, &all, Some((SortColumn::Expenditure, false))), vec![1, 2, 0]);
        assert_eq!(sorted_rows(&ds, &all, Some((SortColumn::Age, true))), vec![1, 2, 0]);
        assert_eq!(sorted_rows(&ds, &all, Some((SortColumn::Timestamp, true))), vec![1, 2, 0]);
        assert_eq!(sorted_rows(&ds, &all, Some((SortColumn::Region, true))), vec![2, 1, 0]);
    }

    #[test]
    fn header_clicks_cycle_sort() {
        let mut t = TableState::default();
        t.click_header(SortColumn::Age);
        assert_eq!(t.sort, Some((SortColumn::Age, true)));
        t.click_header(SortColumn::Age);
        assert_eq!(t.sort, Some((SortColumn::Age, false)));
        t.click_header(SortColumn::Age);
        assert_eq!(t.sort, None);
        t.click_header(SortColumn::Region);
        t.click_header(SortColumn::Age);
        assert_eq!(t.sort, Some((SortColumn::Age, true)));
    }

    #[test]
    fn row_click_toggles_selection() {
        let mut t = TableState::default();
        t.click_row(4);
        assert_eq!(t.selected_row, Some(4));
        t.click_row(2);
        assert_eq!(t.selected_row, Some(2));
        t.click_row(2);
        assert_eq!(t.selected_row, None);
    }
}
