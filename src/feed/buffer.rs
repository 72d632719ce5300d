use std::collections::VecDeque;

use chrono::NaiveDateTime;
use rand::Rng;

use crate::config::SYNTHETIC_EXPENDITURE;
use crate::data::model::{parse_timestamp, Smoker};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// SyntheticRecord
// ---------------------------------------------------------------------------

/// One simulated feed event.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticRecord {
    pub expenditure: f64,
    /// Wall-clock time of the tick, second precision.
    pub timestamp: String,
    pub smoker: Smoker,
}

impl SyntheticRecord {
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }
}

/// Draw a new synthetic record.
///
/// Two candidate amounts are drawn and a coin flip picks one of them. The
/// record's own smoker flag is a second, independent flip, so a `Yes` record
/// may carry the non-smoker candidate.
pub fn generate_record<R: Rng + ?Sized>(rng: &mut R, now: NaiveDateTime) -> SyntheticRecord {
    let (lo, hi) = SYNTHETIC_EXPENDITURE;
    let smokers_amount = round_to_tenth(rng.gen_range(lo..=hi));
    let nonsmokers_amount = round_to_tenth(rng.gen_range(lo..=hi));
    let expenditure = if rng.gen_bool(0.5) {
        smokers_amount
    } else {
        nonsmokers_amount
    };
    let smoker = if rng.gen_bool(0.5) { Smoker::Yes } else { Smoker::No };

    SyntheticRecord {
        expenditure,
        timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        smoker,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// FeedBuffer – fixed-capacity FIFO
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FeedBuffer {
    records: VecDeque<SyntheticRecord>,
    capacity: usize,
}

impl FeedBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record, evicting and returning the oldest one when full.
    pub fn push(&mut self, record: SyntheticRecord) -> Option<SyntheticRecord> {
        if self.capacity == 0 {
            return Some(record);
        }
        let evicted = if self.records.len() >= self.capacity {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    /// Materialise the buffer, oldest first.
    pub fn snapshot(&self) -> Vec<SyntheticRecord> {
        self.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SyntheticRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// ---------------------------------------------------------------------------
// Aggregates for the value boxes
// ---------------------------------------------------------------------------

pub fn smoker_total(records: &[SyntheticRecord], smoker: Smoker) -> f64 {
    records
        .iter()
        .filter(|r| r.smoker == smoker)
        .map(|r| r.expenditure)
        .sum()
}

/// `$` followed by the amount with exactly two decimals.
pub fn format_currency(amount: f64) -> String {
    // Avoid "-0.00" from tiny negative rounding noise.
    let amount = if amount.abs() < 0.005 { 0.0 } else { amount };
    format!("${amount:.2}")
}

/// Text of the two value boxes for one feed snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSummary {
    pub smokers: String,
    pub nonsmokers: String,
}

impl Default for FeedSummary {
    fn default() -> Self {
        Self {
            smokers: format_currency(0.0),
            nonsmokers: format_currency(0.0),
        }
    }
}

impl FeedSummary {
    pub fn from_records(records: &[SyntheticRecord]) -> Self {
        Self {
            smokers: format_currency(smoker_total(records, Smoker::Yes)),
            nonsmokers: format_currency(smoker_total(records, Smoker::No)),
        }
    }
}
