//! Result bucket and evaluation window vocabularies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selection rule applied to a scoring method's ranking.
///
/// Ordering follows the report column order: the single pick first, then the
/// confidence thresholds in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResultBucket {
    /// Top-1 pick; exactly one machine per day.
    #[serde(rename = "TOP1")]
    Top1,
    #[serde(rename = "THRESHOLD_95PCT")]
    Threshold95,
    #[serde(rename = "THRESHOLD_96PCT")]
    Threshold96,
    #[serde(rename = "THRESHOLD_97PCT")]
    Threshold97,
    #[serde(rename = "THRESHOLD_98PCT")]
    Threshold98,
    #[serde(rename = "THRESHOLD_99PCT")]
    Threshold99,
}

impl ResultBucket {
    /// Confidence-threshold buckets in ascending order.
    pub const THRESHOLDS: [ResultBucket; 5] = [
        ResultBucket::Threshold95,
        ResultBucket::Threshold96,
        ResultBucket::Threshold97,
        ResultBucket::Threshold98,
        ResultBucket::Threshold99,
    ];

    /// Every bucket in report order.
    pub const ALL: [ResultBucket; 6] = [
        ResultBucket::Top1,
        ResultBucket::Threshold95,
        ResultBucket::Threshold96,
        ResultBucket::Threshold97,
        ResultBucket::Threshold98,
        ResultBucket::Threshold99,
    ];

    /// The `result_key` value used in input data.
    pub fn key(&self) -> &'static str {
        match self {
            ResultBucket::Top1 => "TOP1",
            ResultBucket::Threshold95 => "THRESHOLD_95PCT",
            ResultBucket::Threshold96 => "THRESHOLD_96PCT",
            ResultBucket::Threshold97 => "THRESHOLD_97PCT",
            ResultBucket::Threshold98 => "THRESHOLD_98PCT",
            ResultBucket::Threshold99 => "THRESHOLD_99PCT",
        }
    }

    /// Short column label for tables.
    pub fn label(&self) -> &'static str {
        match self {
            ResultBucket::Top1 => "TOP1",
            ResultBucket::Threshold95 => "95%",
            ResultBucket::Threshold96 => "96%",
            ResultBucket::Threshold97 => "97%",
            ResultBucket::Threshold98 => "98%",
            ResultBucket::Threshold99 => "99%",
        }
    }

    /// Whether this is the single-pick bucket.
    pub fn is_single_pick(&self) -> bool {
        matches!(self, ResultBucket::Top1)
    }
}

impl fmt::Display for ResultBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ResultBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResultBucket::ALL
            .into_iter()
            .find(|b| b.key() == s)
            .ok_or_else(|| format!("unknown result bucket: {}", s))
    }
}

/// Lookback period a method's performance was measured over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationWindow {
    /// The recent, shorter lookback (60 days by default).
    Short,
    /// The longer reference lookback (120 days by default).
    Long,
}

impl fmt::Display for EvaluationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationWindow::Short => write!(f, "short"),
            EvaluationWindow::Long => write!(f, "long"),
        }
    }
}
