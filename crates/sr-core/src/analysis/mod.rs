//! Method comparison analysis.
//!
//! Four stages, each a pure function over immutable inputs:
//! - [`analyzer`]: rows of one combination → [`CombinationResult`]
//! - [`comparator`]: result → flat per-method table over focus buckets
//! - [`selector`]: result → best method per bucket kind
//! - [`delta`]: short and long results → per-method payout deltas
//!
//! [`CombinationResult`]: sr_common::CombinationResult

pub mod analyzer;
pub mod comparator;
pub mod delta;
pub mod selector;

pub use analyzer::{analyze, analyze_combination};
pub use comparator::compare;
pub use delta::compare_windows;
pub use selector::select_best;
