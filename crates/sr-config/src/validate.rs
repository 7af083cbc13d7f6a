//! Configuration validation errors and semantic validation.

use std::collections::BTreeSet;
use thiserror::Error;

use crate::analysis::{AnalysisConfig, MachineRange};

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

/// Validate an analysis configuration semantically.
pub fn validate_config(config: &AnalysisConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    if config.windows.short_days == 0 {
        return Err(ValidationError::InvalidValue {
            field: "windows.short_days".to_string(),
            message: "must be positive".to_string(),
        });
    }
    if config.windows.short_days >= config.windows.long_days {
        return Err(ValidationError::SemanticError(format!(
            "windows.short_days ({}) must be less than windows.long_days ({})",
            config.windows.short_days, config.windows.long_days
        )));
    }

    validate_range("selection.threshold_98", &config.selection.threshold_98)?;
    validate_range("selection.threshold_99", &config.selection.threshold_99)?;

    let margin = config.selection.equivalence_margin;
    if !margin.is_finite() || margin < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "selection.equivalence_margin".to_string(),
            message: format!("must be a non-negative number, got {}", margin),
        });
    }

    if config.focus_buckets.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "focus_buckets".to_string(),
            message: "must name at least one bucket".to_string(),
        });
    }
    let mut seen = BTreeSet::new();
    for bucket in &config.focus_buckets {
        if !seen.insert(*bucket) {
            return Err(ValidationError::InvalidValue {
                field: "focus_buckets".to_string(),
                message: format!("duplicate bucket {}", bucket),
            });
        }
    }

    Ok(())
}

fn validate_range(field: &str, range: &MachineRange) -> ValidationResult<()> {
    let (min, max) = (range.min_avg_machines, range.max_avg_machines);
    if !min.is_finite() || !max.is_finite() || min < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("bounds must be finite and non-negative, got [{}, {}]", min, max),
        });
    }
    if min > max {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("min_avg_machines ({}) exceeds max_avg_machines ({})", min, max),
        });
    }
    Ok(())
}
