//! Per-combination analysis results.
//!
//! These are the structures the analysis stages produce and the report
//! renderers consume. Every metric is an `Option<f64>`: `None` is a
//! first-class "not available" state that renders as a placeholder and is
//! never used in comparisons or arithmetic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::bucket::ResultBucket;

/// The four metrics recorded for one (method, bucket) slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketMetrics {
    pub win_rate: Option<f64>,
    pub payout_rate: Option<f64>,
    pub avg_diff: Option<f64>,
    /// Average machines selected per day; always 1.0 for the single pick.
    pub avg_machines: Option<f64>,
}

impl BucketMetrics {
    /// All four metrics missing.
    pub fn missing() -> Self {
        Self::default()
    }

    /// Whether every metric is missing.
    pub fn is_missing(&self) -> bool {
        self.win_rate.is_none()
            && self.payout_rate.is_none()
            && self.avg_diff.is_none()
            && self.avg_machines.is_none()
    }
}

/// Bucket → metrics for one method. Sparse: absent buckets are not present.
pub type MethodBuckets = BTreeMap<ResultBucket, BucketMetrics>;

/// Reduced view of one (store, machine, window, window kind) combination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinationResult {
    /// Days that contributed to the evaluation, taken from the first matching row.
    pub evaluation_days_count: Option<u32>,
    /// Method name → bucket → metrics, ordered by method name.
    pub methods: BTreeMap<String, MethodBuckets>,
}

impl CombinationResult {
    /// Metrics for a (method, bucket) slot, if recorded.
    pub fn bucket(&self, method: &str, bucket: ResultBucket) -> Option<&BucketMetrics> {
        self.methods.get(method).and_then(|b| b.get(&bucket))
    }

    /// Payout rate for a (method, bucket) slot, if the slot and value exist.
    pub fn payout_rate(&self, method: &str, bucket: ResultBucket) -> Option<f64> {
        self.bucket(method, bucket).and_then(|m| m.payout_rate)
    }

    /// Number of methods with a single-pick result.
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// One focus bucket's metrics inside a comparison row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusCell {
    pub bucket: ResultBucket,
    #[serde(flatten)]
    pub metrics: BucketMetrics,
}

/// One method's metrics across the focus buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub method: String,
    /// One cell per focus bucket, in focus order.
    pub cells: Vec<FocusCell>,
}

impl ComparisonRow {
    /// Metrics for a focus bucket; `None` if the bucket was not in focus.
    pub fn cell(&self, bucket: ResultBucket) -> Option<&BucketMetrics> {
        self.cells
            .iter()
            .find(|c| c.bucket == bucket)
            .map(|c| &c.metrics)
    }
}

/// The chosen method for one bucket kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub bucket: ResultBucket,
    pub method: String,
    pub payout_rate: f64,
    pub avg_machines: Option<f64>,
}

/// Signed payout difference between the single pick and the 98% pick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoutGap {
    /// single_pick payout − threshold_98 payout, in percentage points.
    pub diff: f64,
    /// Set when |diff| is below the equivalence margin. Informational only.
    pub practically_equivalent: bool,
}

/// Best-method picks for one combination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub single_pick: Option<Recommendation>,
    pub threshold_98: Option<Recommendation>,
    pub threshold_99: Option<Recommendation>,
    pub payout_gap: Option<PayoutGap>,
}

impl Recommendations {
    /// Number of bucket kinds with a pick.
    pub fn count(&self) -> usize {
        [&self.single_pick, &self.threshold_98, &self.threshold_99]
            .iter()
            .filter(|r| r.is_some())
            .count()
    }

    /// Picks in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Recommendation> {
        self.single_pick
            .iter()
            .chain(self.threshold_98.iter())
            .chain(self.threshold_99.iter())
    }
}

/// Short-vs-long payout comparison for one method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowDelta {
    pub method: String,
    pub single_pick_payout_short: Option<f64>,
    pub single_pick_payout_long: Option<f64>,
    /// long − short.
    pub single_pick_delta: Option<f64>,
    pub threshold_99_payout_short: Option<f64>,
    pub threshold_99_payout_long: Option<f64>,
    /// long − short.
    pub threshold_99_delta: Option<f64>,
}
