use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Column names of the input file, in file order.
pub const COLUMN_NAMES: [&str; 6] = ["age", "gender", "expenditure", "smoker", "region", "timestamp"];

/// Formats accepted when a record timestamp is read as a date-time.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// ---------------------------------------------------------------------------
// Categorical columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Smoker {
    Yes,
    No,
}

impl Smoker {
    pub const ALL: [Smoker; 2] = [Smoker::Yes, Smoker::No];

    pub fn label(self) -> &'static str {
        match self {
            Smoker::Yes => "Yes",
            Smoker::No => "No",
        }
    }
}

impl fmt::Display for Smoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ExpenditureRecord – one row of the input file
// ---------------------------------------------------------------------------

/// A single expenditure row. Field order matches [`COLUMN_NAMES`] so the
/// headerless CSV deserializes positionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenditureRecord {
    pub age: u32,
    pub gender: Gender,
    pub expenditure: f64,
    pub smoker: Smoker,
    pub region: String,
    /// Kept as written in the file; see [`ExpenditureRecord::parsed_timestamp`].
    pub timestamp: String,
}

impl ExpenditureRecord {
    /// Interpret the timestamp column as a date-time, if it looks like one.
    /// A bare date is read as midnight.
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Where the rows of a [`Dataset`] came from.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetSource {
    /// Parsed from the CSV; `skipped` rows failed to parse.
    File { skipped: usize },
    /// The file could not be used; the reason is shown in the UI.
    Unavailable(String),
}

/// The read-only table every session filters.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<ExpenditureRecord>,
    pub source: DatasetSource,
}

impl Dataset {
    pub fn from_records(records: Vec<ExpenditureRecord>) -> Self {
        Dataset {
            records,
            source: DatasetSource::File { skipped: 0 },
        }
    }

    /// An empty table with the usual six columns.
    pub fn empty(reason: impl Into<String>) -> Self {
        Dataset {
            records: Vec::new(),
            source: DatasetSource::Unavailable(reason.into()),
        }
    }

    pub fn column_names(&self) -> &'static [&'static str] {
        &COLUMN_NAMES
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: &str) -> ExpenditureRecord {
        ExpenditureRecord {
            age: 40,
            gender: Gender::Male,
            expenditure: 1000.0,
            smoker: Smoker::Yes,
            region: "X".into(),
            timestamp: timestamp.into(),
        }
    }

    #[test]
    fn timestamp_accepts_common_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(record("2024-03-05 14:30:00").parsed_timestamp(), Some(expected));
        assert_eq!(record("2024-03-05T14:30:00").parsed_timestamp(), Some(expected));
        assert_eq!(
            record("2024-03-05").parsed_timestamp(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn opaque_timestamp_stays_text() {
        let r = record("T");
        assert_eq!(r.parsed_timestamp(), None);
        assert_eq!(r.timestamp, "T");
    }

    #[test]
    fn empty_dataset_keeps_columns() {
        let ds = Dataset::empty("missing");
        assert!(ds.is_empty());
        assert_eq!(ds.column_names(), &COLUMN_NAMES);
        assert_eq!(ds.source, DatasetSource::Unavailable("missing".into()));
    }

    #[test]
    fn labels_match_file_values() {
        assert_eq!(Gender::Female.to_string(), "Female");
        assert_eq!(Smoker::No.to_string(), "No");
    }
}
