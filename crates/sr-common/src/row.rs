//! Typed input rows and their grouping key.

use serde::{Deserialize, Serialize};

use crate::bucket::{EvaluationWindow, ResultBucket};

/// One evaluation record: a (store, machine, window, method, bucket) slot and its metrics.
///
/// Metric fields are `None` when the source value was absent or unparseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub store: String,
    pub machine: String,
    pub evaluation_window: EvaluationWindow,
    /// Day-type slice the evaluation was run on (e.g. `espas`, `island`).
    pub window_kind: String,
    /// Number of days that actually contributed to the evaluation.
    pub evaluation_days_count: Option<u32>,
    pub method: String,
    pub result_bucket: ResultBucket,
    pub win_rate: Option<f64>,
    pub payout_rate: Option<f64>,
    pub avg_diff: Option<f64>,
    pub avg_machines_per_day: Option<f64>,
}

impl Row {
    /// The combination this row belongs to.
    pub fn combination(&self) -> Combination {
        Combination {
            store: self.store.clone(),
            machine: self.machine.clone(),
            window: self.evaluation_window,
            window_kind: self.window_kind.clone(),
        }
    }

    /// Whether this row belongs to the given combination.
    pub fn matches(&self, combination: &Combination) -> bool {
        self.store == combination.store
            && self.machine == combination.machine
            && self.evaluation_window == combination.window
            && self.window_kind == combination.window_kind
    }
}

/// Grouping key: (store, machine, evaluation window, window kind).
///
/// Field order gives the lexicographic display order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Combination {
    pub store: String,
    pub machine: String,
    pub window: EvaluationWindow,
    pub window_kind: String,
}

impl Combination {
    pub fn new(
        store: impl Into<String>,
        machine: impl Into<String>,
        window: EvaluationWindow,
        window_kind: impl Into<String>,
    ) -> Self {
        Self {
            store: store.into(),
            machine: machine.into(),
            window,
            window_kind: window_kind.into(),
        }
    }

    /// The same store/machine/kind on the other window.
    pub fn with_window(&self, window: EvaluationWindow) -> Self {
        Self {
            window,
            ..self.clone()
        }
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.store, self.machine, self.window, self.window_kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        Row {
            store: "A".to_string(),
            machine: "X".to_string(),
            evaluation_window: EvaluationWindow::Short,
            window_kind: "espas".to_string(),
            evaluation_days_count: Some(58),
            method: "m1".to_string(),
            result_bucket: ResultBucket::Top1,
            win_rate: Some(55.0),
            payout_rate: Some(80.0),
            avg_diff: None,
            avg_machines_per_day: None,
        }
    }

    #[test]
    fn test_row_matches_own_combination() {
        let r = row();
        assert!(r.matches(&r.combination()));
    }

    #[test]
    fn test_row_does_not_match_other_window() {
        let r = row();
        let other = r.combination().with_window(EvaluationWindow::Long);
        assert!(!r.matches(&other));
    }

    #[test]
    fn test_combination_ordering_is_by_store_first() {
        let a = Combination::new("A", "Z", EvaluationWindow::Long, "espas");
        let b = Combination::new("B", "A", EvaluationWindow::Short, "espas");
        assert!(a < b);
    }

    #[test]
    fn test_combination_display() {
        let c = Combination::new("A", "X", EvaluationWindow::Short, "espas");
        assert_eq!(c.to_string(), "A/X/short/espas");
    }
}
