//! Fuzz target for evaluation-results CSV loading.
//!
//! Arbitrary bytes must load or fail with a `LoadError`, and a successful
//! load must be analyzable end to end.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sr_config::AnalysisConfig;
use sr_core::assemble::ReportAssembler;
use sr_core::dataset::{read_csv, Dataset};

fuzz_target!(|data: &[u8]| {
    let config = AnalysisConfig::default();
    if let Ok((rows, stats)) = read_csv(data, &config.windows) {
        assert_eq!(rows.len(), stats.rows_loaded);
        let dataset = Dataset::new(rows);
        let _ = ReportAssembler::new(&config).assemble(&dataset, Default::default());
    }
});
