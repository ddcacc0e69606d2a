//! CSV bar ingestion.
//!
//! Columns: `timestamp,open,high,low,close,volume` with timestamps in unix
//! seconds. The loader owns all input validation the core refuses to do:
//! malformed rows and out-of-order timestamps are rejected here, so the
//! engine only ever sees a clean, time-ordered sequence.

use regimelab_core::domain::Bar;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open { path: String, source: csv::Error },

    #[error("csv parse error at record {record}: {source}")]
    Parse { record: usize, source: csv::Error },

    #[error("malformed bar at record {record}: {reason}")]
    MalformedBar { record: usize, reason: String },

    #[error("timestamps not nondecreasing at record {record}: {prev} then {curr}")]
    OutOfOrder { record: usize, prev: i64, curr: i64 },

    #[error("no bars in {path}")]
    Empty { path: String },
}

#[derive(Debug, Deserialize)]
struct BarRow {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl From<BarRow> for Bar {
    fn from(row: BarRow) -> Self {
        Bar::new(row.timestamp, row.open, row.high, row.low, row.close, row.volume)
    }
}

/// Load a bar series from a CSV file, validating as we go.
pub fn load_csv(path: &Path) -> Result<Vec<Bar>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| LoadError::Open {
            path: path.display().to_string(),
            source,
        })?;

    let mut bars = Vec::new();
    let mut prev_timestamp: Option<i64> = None;

    for (index, record) in reader.deserialize::<BarRow>().enumerate() {
        let record_no = index + 1;
        let row = record.map_err(|source| LoadError::Parse {
            record: record_no,
            source,
        })?;
        let bar: Bar = row.into();

        if !bar.is_well_formed() {
            return Err(LoadError::MalformedBar {
                record: record_no,
                reason: format!(
                    "timestamp={}, open={}, high={}, low={}",
                    bar.timestamp, bar.open, bar.high, bar.low
                ),
            });
        }

        if let Some(prev) = prev_timestamp {
            if bar.timestamp < prev {
                return Err(LoadError::OutOfOrder {
                    record: record_no,
                    prev,
                    curr: bar.timestamp,
                });
            }
        }
        prev_timestamp = Some(bar.timestamp);

        bars.push(bar);
    }

    if bars.is_empty() {
        return Err(LoadError::Empty {
            path: path.display().to_string(),
        });
    }

    Ok(bars)
}
