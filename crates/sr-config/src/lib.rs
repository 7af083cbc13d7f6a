//! Score review analysis configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for `analysis.json`
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation
//! - Config snapshots embedded in the JSON report

pub mod analysis;
pub mod load;
pub mod resolve;
pub mod snapshot;
pub mod validate;

pub use analysis::{AnalysisConfig, MachineRange, SelectionConfig, WindowConfig};
pub use load::{load_config, load_from_path, parse_config, ConfigError, ResolvedConfig};
pub use resolve::{resolve_config_path, ConfigSource};
pub use snapshot::ConfigSnapshot;
pub use validate::{validate_config, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
