use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use thiserror::Error;

use super::model::{Dataset, DatasetSource, ExpenditureRecord, COLUMN_NAMES};

/// Rows echoed to the log after a successful load.
const PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why the expenditure file could not be turned into a dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} does not exist", .0.display())]
    Missing(PathBuf),

    #[error("{} is empty", .0.display())]
    Empty(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset, falling back to an empty table on any failure.
///
/// This is the startup path: the failure is logged and recorded in
/// [`Dataset::source`], never raised to the caller.
pub fn load_or_empty(path: &Path) -> Dataset {
    match load_dataset(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} expenditure records from {}",
                dataset.len(),
                path.display()
            );
            for record in dataset.records.iter().take(PREVIEW_ROWS) {
                log::info!("  {record:?}");
            }
            dataset
        }
        Err(e @ (LoadError::Missing(_) | LoadError::Empty(_))) => {
            log::warn!("The CSV file does not exist or is empty: {e}");
            Dataset::empty(e.to_string())
        }
        Err(e) => {
            log::error!("Failed to load {}: {e}", path.display());
            Dataset::empty(e.to_string())
        }
    }
}

/// Read a headerless CSV whose columns are [`COLUMN_NAMES`] in order.
///
/// Blank lines are ignored. Rows that fail to parse are logged and skipped;
/// the count ends up in [`DatasetSource::File`].
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::Missing(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    if meta.len() == 0 {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    let mut skipped = 0;

    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                log::warn!("Skipping unreadable row: {e}");
                skipped += 1;
                continue;
            }
        };
        if row.iter().all(str::is_empty) {
            continue;
        }
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        match parse_row(&row, line) {
            Ok(record) => records.push(record),
            Err(e) => {
                log::warn!("Skipping row: {e:#}");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::warn!("{skipped} malformed rows skipped in {}", path.display());
    }

    Ok(Dataset {
        records,
        source: DatasetSource::File { skipped },
    })
}

fn parse_row(row: &csv::StringRecord, line: u64) -> anyhow::Result<ExpenditureRecord> {
    if row.len() != COLUMN_NAMES.len() {
        anyhow::bail!(
            "CSV line {line}: expected {} columns, found {}",
            COLUMN_NAMES.len(),
            row.len()
        );
    }
    row.deserialize::<ExpenditureRecord>(None)
        .with_context(|| format!("CSV line {line}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Gender, Smoker};

    fn write_csv(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("healthexp.csv");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_headerless_rows_in_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "40,Male,1000,Yes,X,2024-01-01 10:00:00\n62,Female,2450.5,No,southwest,2024-01-02 11:30:00\n",
        );
        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.source, DatasetSource::File { skipped: 0 });
        assert_eq!(
            ds.records[0],
            ExpenditureRecord {
                age: 40,
                gender: Gender::Male,
                expenditure: 1000.0,
                smoker: Smoker::Yes,
                region: "X".into(),
                timestamp: "2024-01-01 10:00:00".into(),
            }
        );
        assert_eq!(ds.records[1].expenditure, 2450.5);
        assert_eq!(ds.records[1].smoker, Smoker::No);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "\n40,Male,1000,Yes,X,T\n\n\n30,Female,800,No,Y,T\n\n",
        );
        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn malformed_rows_are_skipped_and_counted() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "40,Male,1000,Yes,X,T\nforty,Male,1000,Yes,X,T\n41,Other,1000,Yes,X,T\n42,Male,1000\n",
        );
        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.source, DatasetSource::File { skipped: 3 });
    }

    #[test]
    fn invalid_utf8_row_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("healthexp.csv");
        let mut bytes = b"40,Male,1000,Yes,X,T\n41,Male,1000,Yes,".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b",T\n42,Female,1200,No,Y,T\n");
        std::fs::write(&path, bytes).unwrap();

        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].age, 40);
        assert_eq!(ds.records[1].age, 42);
        assert_eq!(ds.source, DatasetSource::File { skipped: 1 });
        assert_eq!(load_or_empty(&path).len(), 2);
    }

    #[test]
    fn zero_byte_file_is_empty_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "");
        assert!(matches!(load_dataset(&path), Err(LoadError::Empty(_))));
    }

    #[test]
    fn missing_file_is_missing_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        assert!(matches!(load_dataset(&path), Err(LoadError::Missing(_))));
    }

    #[test]
    fn load_or_empty_substitutes_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let empty = write_csv(dir.path(), "");
        let ds = load_or_empty(&empty);
        assert!(ds.is_empty());
        assert_eq!(ds.column_names(), &COLUMN_NAMES);
        assert!(matches!(ds.source, DatasetSource::Unavailable(_)));

        let ds = load_or_empty(&dir.path().join("missing.csv"));
        assert!(ds.is_empty());
        assert_eq!(ds.column_names().len(), 6);
    }
}
