//! Score review common types and errors.
//!
//! This crate provides foundational types shared across the score review crates:
//! - Result bucket and evaluation window vocabularies
//! - The typed input row and its grouping key
//! - Per-combination analysis results consumed by renderers
//! - Common error types
//! - Output formats

pub mod bucket;
pub mod error;
pub mod metrics;
pub mod output;
pub mod row;

pub use bucket::{EvaluationWindow, ResultBucket};
pub use error::{format_error_human, Error, ErrorCategory, Result, StructuredError};
pub use metrics::{
    BucketMetrics, CombinationResult, ComparisonRow, FocusCell, MethodBuckets, PayoutGap,
    Recommendation, Recommendations, WindowDelta,
};
pub use output::OutputFormat;
pub use row::{Combination, Row};

/// Schema version of the serialized report document.
pub const SCHEMA_VERSION: &str = "1.0.0";
