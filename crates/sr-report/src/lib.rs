//! Report document and renderers for score review.
//!
//! The core builds a [`ReportDocument`] from analysis results; this crate
//! owns the document's section types and turns it into text.
//!
//! # Sections
//!
//! - Overview: input provenance, load accounting, stores and machines
//! - Stores: per store → machine → window comparison tables and picks
//! - Window deltas: short vs long payout per window kind
//! - Guidelines: how to read the tables when choosing a method
//!
//! # Formats
//!
//! - `md`: Markdown for humans (default)
//! - `json`: the whole document, pretty-printed
//! - `summary`: one `key=value` line
//!
//! # Example
//!
//! ```no_run
//! use sr_common::OutputFormat;
//! use sr_report::{ReportConfig, ReportDocument, ReportGenerator};
//!
//! # fn doc() -> ReportDocument { unimplemented!() }
//! let generator = ReportGenerator::new(ReportConfig::default());
//! let markdown = generator.render(&doc(), OutputFormat::Md).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod sections;

pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use generator::{ReportDocument, ReportGenerator};
