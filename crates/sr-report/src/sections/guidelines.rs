//! Decision guidelines appended to the report.

use serde::{Deserialize, Serialize};
use sr_config::{SelectionConfig, WindowConfig};

/// One numbered guideline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guideline {
    /// Situation the guideline applies to.
    pub when: String,
    /// What to do.
    pub advice: String,
}

/// Guidelines for reading the report and for parameterising the
/// recommendation query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidelinesSection {
    pub decision: Vec<Guideline>,
    pub query_parameters: Vec<String>,
}

impl GuidelinesSection {
    /// The standard guideline text, filled in with the configured margin and
    /// window lengths.
    pub fn standard(selection: &SelectionConfig, windows: &WindowConfig) -> Self {
        let margin = selection.equivalence_margin;
        let decision = vec![
            Guideline {
                when: "Targeting a single machine".to_string(),
                advice: "choose the method with the highest TOP1 payout rate.".to_string(),
            },
            Guideline {
                when: "Targeting two or three machines".to_string(),
                advice: "weigh the 98% and 99% threshold results.".to_string(),
            },
            Guideline {
                when: format!("TOP1 and 98%/99% payout differ by less than {margin:.2} points"),
                advice: "prefer the threshold bucket; it leaves more machines to play.".to_string(),
            },
            Guideline {
                when: format!(
                    "{}-day and {}-day trends disagree",
                    windows.short_days, windows.long_days
                ),
                advice: format!(
                    "lean on the more recent {}-day data, and also consider methods that are stable over {} days.",
                    windows.short_days, windows.long_days
                ),
            },
        ];
        let query_parameters = vec![
            "Use this report to pick the best method for the target store and machine.".to_string(),
            "Set the `score_method` parameter to that method.".to_string(),
            "Use `THRESHOLD_98PCT` or `THRESHOLD_99PCT` as the threshold.".to_string(),
        ];
        Self {
            decision,
            query_parameters,
        }
    }
}
