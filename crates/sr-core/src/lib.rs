//! Score review core library.
//!
//! Loads scoring-method evaluation results, compares methods per store,
//! machine and evaluation window, picks the best method per bucket kind,
//! and assembles the report document.
//!
//! Stages:
//! - [`dataset`]: CSV loading and the combination index
//! - [`groups`]: distinct stores, machines and combinations
//! - [`analysis`]: analyzer, comparator, selector, window deltas
//! - [`assemble`]: the report document
//! - [`pipeline`]: config + input + assembly + rendering in one call

pub mod analysis;
pub mod assemble;
pub mod dataset;
pub mod exit_codes;
pub mod groups;
pub mod logging;
pub mod pipeline;

#[cfg(test)]
pub mod test_utils;

pub use assemble::ReportAssembler;
pub use dataset::{Dataset, LoadedDataset};
pub use exit_codes::ExitCode;
pub use pipeline::{build_document, generate_report, ReviewOptions};
