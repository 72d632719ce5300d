use std::collections::BTreeSet;
use std::sync::Arc;

use super::model::{Dataset, ExpenditureRecord, Gender, Smoker};
use crate::config::{AGE_BOUNDS, AGE_DEFAULT, EXPENDITURE_BOUNDS, EXPENDITURE_DEFAULT};

// ---------------------------------------------------------------------------
// RangeSelection – an inclusive [min, max] with its slider bounds
// ---------------------------------------------------------------------------

/// Inclusive selection on a numeric column. `min <= max` always holds.
/// `bounds` is the widget range the sidebar slider offers; the selection
/// itself is not restricted to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSelection<T> {
    bounds: (T, T),
    min: T,
    max: T,
}

impl<T: Copy + PartialOrd> RangeSelection<T> {
    pub fn new(bounds: (T, T), selection: (T, T)) -> Self {
        let mut range = RangeSelection {
            bounds,
            min: bounds.0,
            max: bounds.1,
        };
        range.set(selection.0, selection.1);
        range
    }

    pub fn bounds(&self) -> (T, T) {
        self.bounds
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Move the lower end; the upper end follows if it would be crossed.
    pub fn set_min(&mut self, value: T) {
        self.min = value;
        if self.max < self.min {
            self.max = self.min;
        }
    }

    /// Move the upper end; the lower end follows if it would be crossed.
    pub fn set_max(&mut self, value: T) {
        self.max = value;
        if self.min > self.max {
            self.min = self.max;
        }
    }

    /// Store both ends, swapping them if given in reverse.
    pub fn set(&mut self, min: T, max: T) {
        let (a, b) = if min <= max { (min, max) } else { (max, min) };
        self.min = a;
        self.max = b;
    }
}

// ---------------------------------------------------------------------------
// FilterState – the four user-controlled filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub selected_gender: BTreeSet<Gender>,
    pub selected_smoker: BTreeSet<Smoker>,
    pub expenditure_range: RangeSelection<f64>,
    pub age_range: RangeSelection<u32>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_gender: Gender::ALL.into_iter().collect(),
            selected_smoker: Smoker::ALL.into_iter().collect(),
            expenditure_range: RangeSelection::new(EXPENDITURE_BOUNDS, EXPENDITURE_DEFAULT),
            age_range: RangeSelection::new(AGE_BOUNDS, AGE_DEFAULT),
        }
    }
}

impl FilterState {
    /// All four predicates at once. An empty category set matches nothing.
    pub fn matches(&self, record: &ExpenditureRecord) -> bool {
        self.selected_gender.contains(&record.gender)
            && self.selected_smoker.contains(&record.smoker)
            && self.expenditure_range.contains(record.expenditure)
            && self.age_range.contains(record.age)
    }

    pub fn toggle_gender(&mut self, gender: Gender) {
        if !self.selected_gender.remove(&gender) {
            self.selected_gender.insert(gender);
        }
    }

    pub fn toggle_smoker(&mut self, smoker: Smoker) {
        if !self.selected_smoker.remove(&smoker) {
            self.selected_smoker.insert(smoker);
        }
    }

    pub fn select_all_genders(&mut self) {
        self.selected_gender = Gender::ALL.into_iter().collect();
    }

    pub fn select_no_genders(&mut self) {
        self.selected_gender.clear();
    }

    pub fn select_all_smokers(&mut self) {
        self.selected_smoker = Smoker::ALL.into_iter().collect();
    }

    pub fn select_no_smokers(&mut self) {
        self.selected_smoker.clear();
    }
}

/// Return indices of records that pass every filter, in dataset order.
pub fn filtered_indices(dataset: &Dataset, filters: &FilterState) -> Vec<usize> {
    if filters.selected_gender.is_empty() || filters.selected_smoker.is_empty() {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| filters.matches(record))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – memoised filter result
// ---------------------------------------------------------------------------

/// Caches the last [`filtered_indices`] result and recomputes only when the
/// filters or the dataset change.
#[derive(Debug)]
pub struct FilteredView {
    inputs: Option<(Arc<Dataset>, FilterState)>,
    indices: Arc<[usize]>,
}

impl Default for FilteredView {
    fn default() -> Self {
        Self {
            inputs: None,
            indices: Arc::from(Vec::new()),
        }
    }
}

impl FilteredView {
    pub fn view(&mut self, dataset: &Arc<Dataset>, filters: &FilterState) -> Arc<[usize]> {
        let fresh = matches!(
            &self.inputs,
            Some((ds, f)) if Arc::ptr_eq(ds, dataset) && f == filters
        );
        if !fresh {
            self.indices = filtered_indices(dataset, filters).into();
            self.inputs = Some((Arc::clone(dataset), filters.clone()));
            log::debug!("Filtered view recomputed: {} rows", self.indices.len());
        }
        Arc::clone(&self.indices)
    }
}
