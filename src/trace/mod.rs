//! Trace ingestion and reshaping.
//!
//! Traces are newline-delimited JSON: one object per line, blank lines
//! ignored. This module reads and writes that format, reshapes raw build
//! records into simulator input, and re-orders raw records without
//! dropping any of their fields.

mod synthetic;

pub use synthetic::SyntheticTrace;

use std::io::{BufRead, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{BuildRecord, JobRequest};

/// Errors raised while reading or writing traces.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize record: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("record {index}: missing numeric field '{key}'")]
    MissingKey { index: usize, key: &'static str },
}

/// Field used to order raw build records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// `starttime` (default).
    #[default]
    StartTime,
    /// `requesttime`.
    RequestTime,
}

impl SortKey {
    /// JSON field name.
    pub fn field(&self) -> &'static str {
        match self {
            SortKey::StartTime => "starttime",
            SortKey::RequestTime => "requesttime",
        }
    }
}

/// Reads one JSON record per non-blank line.
///
/// Parse errors report the 1-based line number.
pub fn read_records<T: DeserializeOwned>(reader: impl BufRead) -> Result<Vec<T>, TraceError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| TraceError::Parse {
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }
    info!(records = records.len(), "read trace");
    Ok(records)
}

/// Writes one compact JSON record per line.
pub fn write_records<T: Serialize>(
    mut writer: impl Write,
    records: &[T],
) -> Result<(), TraceError> {
    for record in records {
        serde_json::to_writer(&mut writer, record).map_err(TraceError::Serialize)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Reshapes build records into `(request time, duration)` pairs.
pub fn extract_jobs(records: &[BuildRecord]) -> Vec<JobRequest> {
    records.iter().map(BuildRecord::to_job_request).collect()
}

/// Stable-sorts raw records by a timestamp field.
///
/// Records are kept as untyped JSON so every field survives the round
/// trip. Fails on the first record lacking a numeric `key`.
pub fn sort_records(records: Vec<Value>, key: SortKey) -> Result<Vec<Value>, TraceError> {
    let field = key.field();
    let mut keyed = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .get(field)
                .and_then(Value::as_f64)
                .map(|k| (k, record))
                .ok_or(TraceError::MissingKey { index, key: field })
        })
        .collect::<Result<Vec<_>, _>>()?;

    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    debug!(records = keyed.len(), key = field, "sorted records");
    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}
