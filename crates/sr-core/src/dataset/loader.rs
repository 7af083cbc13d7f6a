//! CSV loader for evaluation results.
//!
//! Key columns are required; a header without them is fatal. Everything
//! below the header is best-effort: metric values that are empty,
//! unparseable or non-finite become missing, and rows whose keys cannot be
//! interpreted are skipped and counted in [`LoadStats`]. A single bad record
//! never aborts the load.

use serde::{Deserialize, Serialize};
use sr_common::{ResultBucket, Row};
use sr_config::WindowConfig;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::Dataset;

pub const COL_STORE: &str = "target_hole";
pub const COL_MACHINE: &str = "target_machine";
pub const COL_EVALUATION_DAYS: &str = "evaluation_days";
pub const COL_WINDOW_KIND: &str = "special_day_type";
pub const COL_EVALUATION_DAYS_COUNT: &str = "evaluation_days_count";
pub const COL_METHOD: &str = "score_method";
pub const COL_RESULT_KEY: &str = "result_key";
pub const COL_WIN_RATE: &str = "win_rate";
pub const COL_PAYOUT_RATE: &str = "payout_rate";
pub const COL_AVG_DIFF: &str = "avg_diff";
pub const COL_AVG_MACHINES: &str = "avg_machines_per_day";

/// Columns without which no row can be placed in a combination slot.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_STORE,
    COL_MACHINE,
    COL_EVALUATION_DAYS,
    COL_WINDOW_KIND,
    COL_METHOD,
    COL_RESULT_KEY,
];

/// Errors that abort a load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read CSV header: {0}")]
    Header(String),

    #[error("required column '{column}' not found in input header")]
    MissingColumn { column: String },
}

impl From<LoadError> for sr_common::Error {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::NotFound { path } => sr_common::Error::InputNotFound {
                path: path.display().to_string(),
            },
            LoadError::Io { source, .. } => sr_common::Error::Io(source),
            LoadError::Header(message) => sr_common::Error::MalformedInput(message),
            LoadError::MissingColumn { column } => sr_common::Error::MissingColumn { column },
        }
    }
}

/// Row accounting for one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Data records encountered (header excluded).
    pub rows_read: usize,
    pub rows_loaded: usize,
    /// Records with the wrong field count or empty key fields.
    pub skipped_malformed: usize,
    /// `evaluation_days` not matching either configured window.
    pub skipped_unknown_window: usize,
    /// `result_key` outside the bucket vocabulary.
    pub skipped_unknown_bucket: usize,
}

impl LoadStats {
    pub fn skipped(&self) -> usize {
        self.skipped_malformed + self.skipped_unknown_window + self.skipped_unknown_bucket
    }
}

/// A loaded dataset with its provenance.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub stats: LoadStats,
    pub path: PathBuf,
    /// Hex SHA-256 of the raw input bytes.
    pub sha256: String,
}

/// Load and index a CSV file.
pub fn load_csv(path: &Path, windows: &WindowConfig) -> Result<LoadedDataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let sha256 = sr_config::snapshot::compute_hash(&bytes);

    let (rows, stats) = read_csv(bytes.as_slice(), windows).map_err(|e| match e {
        LoadError::Io { source, .. } => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    info!(
        path = %path.display(),
        rows_read = stats.rows_read,
        rows_loaded = stats.rows_loaded,
        rows_skipped = stats.skipped(),
        "Loaded evaluation results"
    );

    Ok(LoadedDataset {
        dataset: Dataset::new(rows),
        stats,
        path: path.to_path_buf(),
        sha256,
    })
}

/// Parse CSV content into rows.
pub fn read_csv<R: Read>(
    reader: R,
    windows: &WindowConfig,
) -> Result<(Vec<Row>, LoadStats), LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Header(e.to_string()))?
        .clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut rows = Vec::new();
    let mut stats = LoadStats::default();

    for (i, result) in reader.records().enumerate() {
        stats.rows_read += 1;
        let line = i + 2;

        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(LoadError::Io {
                    path: PathBuf::from("<reader>"),
                    source: std::io::Error::other(e.to_string()),
                });
            }
            Err(e) => {
                debug!(line, error = %e, "Skipping malformed record");
                stats.skipped_malformed += 1;
                continue;
            }
        };

        match columns.parse_record(&record, windows) {
            Ok(row) => {
                rows.push(row);
                stats.rows_loaded += 1;
            }
            Err(skip) => {
                debug!(line, reason = %skip, "Skipping record");
                match skip {
                    RecordSkip::EmptyKey(_) => stats.skipped_malformed += 1,
                    RecordSkip::UnknownWindow(_) => stats.skipped_unknown_window += 1,
                    RecordSkip::UnknownBucket(_) => stats.skipped_unknown_bucket += 1,
                }
            }
        }
    }

    if stats.skipped() > 0 {
        warn!(
            malformed = stats.skipped_malformed,
            unknown_window = stats.skipped_unknown_window,
            unknown_bucket = stats.skipped_unknown_bucket,
            "Some input records were skipped"
        );
    }

    Ok((rows, stats))
}

/// Coerce a metric cell: empty, unparseable, or non-finite → missing.
pub fn parse_metric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce a day count; accepts integral floats such as `60.0`.
fn parse_days(raw: &str) -> Option<u32> {
    parse_metric(raw)
        .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= f64::from(u32::MAX))
        .map(|v| v as u32)
}

#[derive(Debug)]
enum RecordSkip {
    EmptyKey(&'static str),
    UnknownWindow(String),
    UnknownBucket(String),
}

impl std::fmt::Display for RecordSkip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSkip::EmptyKey(column) => write!(f, "empty {}", column),
            RecordSkip::UnknownWindow(v) => write!(f, "unknown evaluation_days '{}'", v),
            RecordSkip::UnknownBucket(v) => write!(f, "unknown result_key '{}'", v),
        }
    }
}

/// Header positions of the known columns.
#[derive(Debug)]
struct ColumnMap {
    store: usize,
    machine: usize,
    evaluation_days: usize,
    window_kind: usize,
    method: usize,
    result_key: usize,
    evaluation_days_count: Option<usize>,
    win_rate: Option<usize>,
    payout_rate: Option<usize>,
    avg_diff: Option<usize>,
    avg_machines: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| LoadError::MissingColumn {
                column: name.to_string(),
            })
        };

        let map = ColumnMap {
            store: require(COL_STORE)?,
            machine: require(COL_MACHINE)?,
            evaluation_days: require(COL_EVALUATION_DAYS)?,
            window_kind: require(COL_WINDOW_KIND)?,
            method: require(COL_METHOD)?,
            result_key: require(COL_RESULT_KEY)?,
            evaluation_days_count: find(COL_EVALUATION_DAYS_COUNT),
            win_rate: find(COL_WIN_RATE),
            payout_rate: find(COL_PAYOUT_RATE),
            avg_diff: find(COL_AVG_DIFF),
            avg_machines: find(COL_AVG_MACHINES),
        };

        for (name, idx) in [
            (COL_EVALUATION_DAYS_COUNT, map.evaluation_days_count),
            (COL_WIN_RATE, map.win_rate),
            (COL_PAYOUT_RATE, map.payout_rate),
            (COL_AVG_DIFF, map.avg_diff),
            (COL_AVG_MACHINES, map.avg_machines),
        ] {
            if idx.is_none() {
                warn!(column = name, "Optional column missing; values treated as missing");
            }
        }

        Ok(map)
    }

    fn parse_record(
        &self,
        record: &csv::StringRecord,
        windows: &WindowConfig,
    ) -> Result<Row, RecordSkip> {
        let key = |idx: usize, name: &'static str| -> Result<String, RecordSkip> {
            match record.get(idx) {
                Some(v) if !v.is_empty() => Ok(v.to_string()),
                _ => Err(RecordSkip::EmptyKey(name)),
            }
        };
        let metric = |idx: Option<usize>| idx.and_then(|i| record.get(i)).and_then(parse_metric);

        let store = key(self.store, COL_STORE)?;
        let machine = key(self.machine, COL_MACHINE)?;
        let window_kind = key(self.window_kind, COL_WINDOW_KIND)?;
        let method = key(self.method, COL_METHOD)?;

        let raw_days = record.get(self.evaluation_days).unwrap_or_default();
        let evaluation_window = parse_days(raw_days)
            .and_then(|d| windows.classify(d))
            .ok_or_else(|| RecordSkip::UnknownWindow(raw_days.to_string()))?;

        let raw_key = record.get(self.result_key).unwrap_or_default();
        let result_bucket = raw_key
            .parse::<ResultBucket>()
            .map_err(|_| RecordSkip::UnknownBucket(raw_key.to_string()))?;

        Ok(Row {
            store,
            machine,
            evaluation_window,
            window_kind,
            evaluation_days_count: self
                .evaluation_days_count
                .and_then(|i| record.get(i))
                .and_then(parse_days),
            method,
            result_bucket,
            win_rate: metric(self.win_rate),
            payout_rate: metric(self.payout_rate),
            avg_diff: metric(self.avg_diff),
            avg_machines_per_day: metric(self.avg_machines),
        })
    }
}
