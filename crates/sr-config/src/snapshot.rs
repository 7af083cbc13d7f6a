//! Configuration snapshots for report provenance.
//!
//! A snapshot captures the exact configuration the report was produced with,
//! so a rendered recommendation can be traced back to its thresholds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::analysis::{AnalysisConfig, MachineRange};
use crate::resolve::ConfigSource;

/// A frozen snapshot of configuration state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,

    /// Schema version of the configuration.
    pub schema_version: String,

    /// Path the config was loaded from.
    #[serde(default)]
    pub path: Option<String>,

    /// Source of the configuration.
    pub source: ConfigSource,

    /// SHA-256 of the config file content, or of the serialized defaults.
    pub hash: String,

    /// Key configuration values for quick reference.
    pub summary: ConfigSummary,
}

/// Summary of key configuration values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSummary {
    pub short_days: u32,
    pub long_days: u32,
    pub threshold_98: MachineRange,
    pub threshold_99: MachineRange,
    pub equivalence_margin: f64,
    pub focus_buckets: Vec<String>,
}

impl ConfigSnapshot {
    /// Build a snapshot from a loaded config.
    ///
    /// `content_hash` is the hash of the file the config came from; when the
    /// defaults were used, the serialized config is hashed instead.
    pub fn new(
        config: &AnalysisConfig,
        path: Option<String>,
        source: ConfigSource,
        content_hash: Option<String>,
    ) -> Self {
        let hash = content_hash.unwrap_or_else(|| {
            let serialized = serde_json::to_string(config).unwrap_or_default();
            compute_hash(serialized.as_bytes())
        });

        Self {
            timestamp: Utc::now(),
            schema_version: config.schema_version.clone(),
            path,
            source,
            hash,
            summary: ConfigSummary {
                short_days: config.windows.short_days,
                long_days: config.windows.long_days,
                threshold_98: config.selection.threshold_98,
                threshold_99: config.selection.threshold_99,
                equivalence_margin: config.selection.equivalence_margin,
                focus_buckets: config
                    .focus_buckets
                    .iter()
                    .map(|b| b.key().to_string())
                    .collect(),
            },
        }
    }
}

/// Hex-encoded SHA-256 of raw bytes.
pub fn compute_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}
