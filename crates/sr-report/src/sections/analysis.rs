//! Per-store analysis section data.

use serde::{Deserialize, Serialize};
use sr_common::{ComparisonRow, EvaluationWindow, Recommendations, WindowDelta};

/// Comparison table and picks for one (window, window kind).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowAnalysis {
    pub window: EvaluationWindow,
    /// Configured length of the window in days.
    pub days: u32,
    pub window_kind: String,
    /// Days that actually contributed, as reported by the input.
    pub evaluation_days_count: Option<u32>,
    pub comparison: Vec<ComparisonRow>,
    pub recommendations: Recommendations,
}

/// Short vs long deltas for one window kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowDeltaTable {
    pub window_kind: String,
    pub short_days: u32,
    pub long_days: u32,
    pub deltas: Vec<WindowDelta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSection {
    pub machine: String,
    pub windows: Vec<WindowAnalysis>,
    #[serde(default)]
    pub window_deltas: Vec<WindowDeltaTable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    pub store: String,
    pub machines: Vec<MachineSection>,
}

impl StoreSection {
    /// Window analyses across all machines of the store.
    pub fn window_count(&self) -> usize {
        self.machines.iter().map(|m| m.windows.len()).sum()
    }

    /// Bucket-kind picks across all machines and windows.
    pub fn recommendation_count(&self) -> usize {
        self.machines
            .iter()
            .flat_map(|m| &m.windows)
            .map(|w| w.recommendations.count())
            .sum()
    }
}
