//! Overview section data.

use serde::{Deserialize, Serialize};
use sr_common::EvaluationWindow;

/// Input provenance and row accounting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSummary {
    /// Path the dataset was read from.
    pub path: String,
    /// Hex SHA-256 of the raw input.
    pub sha256: String,
    pub rows_read: usize,
    pub rows_loaded: usize,
    pub skipped_malformed: usize,
    pub skipped_unknown_window: usize,
    pub skipped_unknown_bucket: usize,
}

impl InputSummary {
    /// Total records skipped for any reason.
    pub fn rows_skipped(&self) -> usize {
        self.skipped_malformed + self.skipped_unknown_window + self.skipped_unknown_bucket
    }
}

/// One store and its machines, both sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreMachines {
    pub store: String,
    pub machines: Vec<String>,
}

/// An evaluation window and its configured length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSpan {
    pub window: EvaluationWindow,
    pub days: u32,
}

/// Overview section: what was evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewSection {
    pub input: InputSummary,
    /// Evaluation targets.
    pub stores: Vec<StoreMachines>,
    /// Configured windows, short first.
    pub windows: Vec<WindowSpan>,
    /// Distinct (store, machine, window, window kind) combinations.
    pub combinations: usize,
    /// Distinct scoring methods seen in the input.
    pub methods: Vec<String>,
}

impl OverviewSection {
    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    /// Machines summed over stores.
    pub fn machine_count(&self) -> usize {
        self.stores.iter().map(|s| s.machines.len()).sum()
    }
}
