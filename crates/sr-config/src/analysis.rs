//! Analysis configuration types.
//!
//! Every section has defaults reproducing the standard review heuristics, so
//! a config file only needs to name the values it changes.

use serde::{Deserialize, Serialize};
use sr_common::{EvaluationWindow, ResultBucket};

/// Complete analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub windows: WindowConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    /// Buckets shown in the method comparison table, in column order.
    #[serde(default = "default_focus_buckets")]
    pub focus_buckets: Vec<ResultBucket>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            description: None,
            windows: WindowConfig::default(),
            selection: SelectionConfig::default(),
            focus_buckets: default_focus_buckets(),
        }
    }
}

fn default_focus_buckets() -> Vec<ResultBucket> {
    vec![
        ResultBucket::Top1,
        ResultBucket::Threshold98,
        ResultBucket::Threshold99,
    ]
}

/// `evaluation_days` values that identify the two windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub short_days: u32,
    pub long_days: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            short_days: 60,
            long_days: 120,
        }
    }
}

impl WindowConfig {
    /// Map an `evaluation_days` value to a window.
    pub fn classify(&self, days: u32) -> Option<EvaluationWindow> {
        if days == self.short_days {
            Some(EvaluationWindow::Short)
        } else if days == self.long_days {
            Some(EvaluationWindow::Long)
        } else {
            None
        }
    }

    /// Lookback length of a window in days.
    pub fn days(&self, window: EvaluationWindow) -> u32 {
        match window {
            EvaluationWindow::Short => self.short_days,
            EvaluationWindow::Long => self.long_days,
        }
    }
}

/// Inclusive bounds on a threshold bucket's average machines per day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineRange {
    pub min_avg_machines: f64,
    pub max_avg_machines: f64,
}

impl MachineRange {
    pub const fn new(min_avg_machines: f64, max_avg_machines: f64) -> Self {
        Self {
            min_avg_machines,
            max_avg_machines,
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, avg_machines: f64) -> bool {
        self.min_avg_machines <= avg_machines && avg_machines <= self.max_avg_machines
    }
}

/// Best-method selection heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_threshold_98")]
    pub threshold_98: MachineRange,

    #[serde(default = "default_threshold_99")]
    pub threshold_99: MachineRange,

    /// Payout gap (percentage points) under which the single pick and the 98%
    /// pick are flagged as practically equivalent.
    #[serde(default = "default_equivalence_margin")]
    pub equivalence_margin: f64,
}

fn default_threshold_98() -> MachineRange {
    MachineRange::new(1.0, 2.0)
}

fn default_threshold_99() -> MachineRange {
    MachineRange::new(1.0, 1.5)
}

fn default_equivalence_margin() -> f64 {
    1.0
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            threshold_98: default_threshold_98(),
            threshold_99: default_threshold_99(),
            equivalence_margin: default_equivalence_margin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.windows.short_days, 60);
        assert_eq!(config.windows.long_days, 120);
        assert_eq!(config.selection.threshold_98, MachineRange::new(1.0, 2.0));
        assert_eq!(config.selection.threshold_99, MachineRange::new(1.0, 1.5));
        assert_eq!(config.selection.equivalence_margin, 1.0);
        assert_eq!(config.focus_buckets.len(), 3);
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = MachineRange::new(1.0, 2.0);
        assert!(range.contains(1.0));
        assert!(range.contains(2.0));
        assert!(!range.contains(0.99));
        assert!(!range.contains(2.01));
        assert!(!range.contains(f64::NAN));
    }

    #[test]
    fn test_window_classify() {
        let windows = WindowConfig::default();
        assert_eq!(windows.classify(60), Some(EvaluationWindow::Short));
        assert_eq!(windows.classify(120), Some(EvaluationWindow::Long));
        assert_eq!(windows.classify(90), None);
        assert_eq!(windows.days(EvaluationWindow::Long), 120);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "schema_version": "1.0.0",
            "selection": { "threshold_99": { "min_avg_machines": 1.0, "max_avg_machines": 1.2 } }
        }"#;
        let config: AnalysisConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.selection.threshold_99.max_avg_machines, 1.2);
        assert_eq!(config.selection.threshold_98, MachineRange::new(1.0, 2.0));
        assert_eq!(config.windows, WindowConfig::default());
        assert_eq!(config.focus_buckets, default_focus_buckets());
    }
}
