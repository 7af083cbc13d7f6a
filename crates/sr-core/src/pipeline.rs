//! End-to-end run: config → dataset → document → rendered text.

use sr_common::{OutputFormat, Result};
use sr_config::load_config;
use sr_report::sections::InputSummary;
use sr_report::{ReportConfig, ReportDocument, ReportGenerator};
use std::path::PathBuf;
use tracing::{info, info_span};

use crate::assemble::ReportAssembler;
use crate::dataset::load_csv;

/// Options for one report run.
#[derive(Debug, Clone, Default)]
pub struct ReviewOptions {
    /// Evaluation results CSV.
    pub input: PathBuf,
    /// Explicit analysis config; otherwise resolved from env/XDG/defaults.
    pub config_path: Option<PathBuf>,
    pub format: OutputFormat,
    pub title: Option<String>,
    /// Include the guideline section.
    pub guidelines: bool,
    pub run_id: Option<String>,
}

impl ReviewOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            guidelines: true,
            ..Default::default()
        }
    }

    fn report_config(&self) -> ReportConfig {
        let config = ReportConfig::default().with_guidelines(self.guidelines);
        match &self.title {
            Some(title) => config.with_title(title.clone()),
            None => config,
        }
    }
}

/// Load config and dataset, then assemble the document.
pub fn build_document(opts: &ReviewOptions) -> Result<ReportDocument> {
    let run_id = opts.run_id.as_deref().unwrap_or("-");
    let _span = info_span!("review", run_id = %run_id).entered();

    let resolved = load_config(opts.config_path.as_deref())?;
    let config = &resolved.config;
    info!(source = %resolved.source, "Using analysis config");

    let loaded = load_csv(&opts.input, &config.windows)?;
    let report_config = opts.report_config();

    let mut document = ReportAssembler::new(config)
        .with_title(report_config.title())
        .with_guidelines(opts.guidelines)
        .assemble(&loaded.dataset, InputSummary::from(&loaded));
    document.run_id = opts.run_id.clone();
    document.config = Some(resolved.snapshot());
    Ok(document)
}

/// Produce the rendered report for `opts`.
pub fn generate_report(opts: &ReviewOptions) -> Result<String> {
    let document = build_document(opts)?;
    let rendered = ReportGenerator::new(opts.report_config()).render(&document, opts.format)?;
    Ok(rendered)
}
