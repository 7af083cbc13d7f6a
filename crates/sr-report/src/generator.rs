//! Report generator implementation.

use crate::config::ReportConfig;
use crate::error::Result;
use crate::format;
use crate::sections::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sr_common::{ComparisonRow, OutputFormat, Recommendations, ResultBucket};
use sr_config::ConfigSnapshot;
use std::fmt::Write;
use tracing::debug;

/// Complete report document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Document schema version.
    pub schema_version: String,
    /// Report title.
    pub title: String,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Generator version.
    pub generator_version: String,
    /// Identifier of the run that produced the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    /// Buckets shown in the comparison tables, in column order.
    pub focus_buckets: Vec<ResultBucket>,
    pub overview: OverviewSection,
    pub stores: Vec<StoreSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidelines: Option<GuidelinesSection>,
    /// Analysis configuration in effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigSnapshot>,
}

impl ReportDocument {
    /// Bucket-kind picks across the whole document.
    pub fn recommendation_count(&self) -> usize {
        self.stores.iter().map(|s| s.recommendation_count()).sum()
    }
}

/// Report generator.
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a new report generator with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Render a document in the requested format.
    pub fn render(&self, doc: &ReportDocument, format: OutputFormat) -> Result<String> {
        debug!(%format, stores = doc.stores.len(), "Rendering report");
        match format {
            OutputFormat::Md => self.render_markdown(doc),
            OutputFormat::Json => self.render_json(doc),
            OutputFormat::Summary => Ok(self.render_summary(doc)),
        }
    }

    /// Pretty JSON of the whole document.
    pub fn render_json(&self, doc: &ReportDocument) -> Result<String> {
        let mut out = serde_json::to_string_pretty(doc)?;
        out.push('\n');
        Ok(out)
    }

    /// One `key=value` line.
    pub fn render_summary(&self, doc: &ReportDocument) -> String {
        format!(
            "stores={} machines={} combinations={} recommendations={}\n",
            doc.overview.store_count(),
            doc.overview.machine_count(),
            doc.overview.combinations,
            doc.recommendation_count()
        )
    }

    /// Markdown report.
    pub fn render_markdown(&self, doc: &ReportDocument) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "# {}", doc.title)?;
        writeln!(out)?;
        writeln!(
            out,
            "_Generated {} by score-review {}_",
            doc.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            doc.generator_version
        )?;
        writeln!(out)?;

        self.write_overview(&mut out, doc)?;

        for store in &doc.stores {
            self.write_store(&mut out, doc, store)?;
        }

        if self.config.guidelines {
            if let Some(guidelines) = &doc.guidelines {
                self.write_guidelines(&mut out, guidelines)?;
            }
        }

        Ok(out)
    }

    fn write_overview(&self, out: &mut String, doc: &ReportDocument) -> Result<()> {
        let overview = &doc.overview;
        writeln!(out, "## Overview")?;
        writeln!(out)?;
        writeln!(
            out,
            "Every scoring method is evaluated per store, machine and evaluation window. \
             The 98% and 99% threshold buckets, which narrow the pick to two or three \
             machines, are weighed alongside the TOP1 single pick."
        )?;
        writeln!(out)?;

        writeln!(out, "### Input")?;
        writeln!(out)?;
        writeln!(out, "- Source: `{}`", overview.input.path)?;
        writeln!(out, "- SHA-256: `{}`", overview.input.sha256)?;
        writeln!(
            out,
            "- Rows: {} read, {} loaded, {} skipped",
            overview.input.rows_read,
            overview.input.rows_loaded,
            overview.input.rows_skipped()
        )?;
        if overview.input.rows_skipped() > 0 {
            writeln!(
                out,
                "  - malformed: {}, unknown window: {}, unknown bucket: {}",
                overview.input.skipped_malformed,
                overview.input.skipped_unknown_window,
                overview.input.skipped_unknown_bucket
            )?;
        }
        if !overview.methods.is_empty() {
            let methods: Vec<String> = overview
                .methods
                .iter()
                .map(|m| format::code(&format::md_escape(m)))
                .collect();
            writeln!(out, "- Methods: {}", methods.join(", "))?;
        }
        writeln!(out)?;

        writeln!(out, "### Targets")?;
        writeln!(out)?;
        if overview.stores.is_empty() {
            writeln!(out, "No evaluation results were loaded.")?;
        }
        for store in &overview.stores {
            writeln!(out, "- **{}**", format::md_escape(&store.store))?;
            for machine in &store.machines {
                writeln!(out, "  - {}", format::md_escape(machine))?;
            }
        }
        writeln!(out)?;

        writeln!(out, "### Evaluation windows")?;
        writeln!(out)?;
        for span in &overview.windows {
            writeln!(out, "- {} days ({})", span.days, span.window)?;
        }
        writeln!(out)?;
        writeln!(out, "---")?;
        writeln!(out)?;
        Ok(())
    }

    fn write_store(
        &self,
        out: &mut String,
        doc: &ReportDocument,
        store: &StoreSection,
    ) -> Result<()> {
        writeln!(out, "## {}", format::md_escape(&store.store))?;
        writeln!(out)?;
        for machine in &store.machines {
            writeln!(out, "### {}", format::md_escape(&machine.machine))?;
            writeln!(out)?;
            for window in &machine.windows {
                self.write_window(out, doc, window)?;
            }
            for table in &machine.window_deltas {
                self.write_delta_table(out, table)?;
            }
            writeln!(out, "---")?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_window(
        &self,
        out: &mut String,
        doc: &ReportDocument,
        window: &WindowAnalysis,
    ) -> Result<()> {
        let days_count = window
            .evaluation_days_count
            .map_or_else(|| self.config.placeholder.clone(), |d| d.to_string());
        writeln!(
            out,
            "#### {}-day evaluation, {} (days evaluated: {})",
            window.days,
            format::md_escape(&window.window_kind),
            days_count
        )?;
        writeln!(out)?;

        let labels: Vec<&str> = doc.focus_buckets.iter().map(|b| b.label()).collect();
        writeln!(out, "##### Method comparison ({})", labels.join(" / "))?;
        writeln!(out)?;
        if window.comparison.is_empty() {
            writeln!(out, "No method has a single-pick result for this window.")?;
            writeln!(out)?;
        } else {
            self.write_comparison_table(out, &doc.focus_buckets, &window.comparison)?;
        }

        writeln!(out, "##### Recommendations")?;
        writeln!(out)?;
        self.write_recommendations(out, &window.recommendations)?;
        Ok(())
    }

    fn write_comparison_table(
        &self,
        out: &mut String,
        focus: &[ResultBucket],
        rows: &[ComparisonRow],
    ) -> Result<()> {
        let mut header = vec!["Method".to_string()];
        for bucket in focus {
            header.push(format!("{} win", bucket.label()));
            header.push(format!("{} payout", bucket.label()));
            if !bucket.is_single_pick() {
                header.push(format!("{} machines", bucket.label()));
            }
        }
        writeln!(out, "| {} |", header.join(" | "))?;
        let rule: Vec<&str> = header.iter().map(|_| "---").collect();
        writeln!(out, "|{}|", rule.join("|"))?;

        let ph = self.config.placeholder.as_str();
        for row in rows {
            let mut cells = vec![format::code(&format::md_escape(&row.method))];
            for cell in &row.cells {
                cells.push(format::win_rate(cell.metrics.win_rate, ph));
                cells.push(format::payout(cell.metrics.payout_rate, ph));
                if !cell.bucket.is_single_pick() {
                    cells.push(format::machines(cell.metrics.avg_machines, ph));
                }
            }
            writeln!(out, "| {} |", cells.join(" | "))?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn write_recommendations(&self, out: &mut String, recs: &Recommendations) -> Result<()> {
        let ph = self.config.placeholder.as_str();
        if recs.count() == 0 {
            writeln!(out, "- No method qualified.")?;
        }
        for rec in recs.iter() {
            if rec.bucket.is_single_pick() {
                writeln!(
                    out,
                    "- **Best {} payout**: {} ({})",
                    rec.bucket.label(),
                    format::code(&rec.method),
                    format::payout(Some(rec.payout_rate), ph)
                )?;
            } else {
                writeln!(
                    out,
                    "- **Best {} threshold payout**: {} ({}, avg {} machines)",
                    rec.bucket.label(),
                    format::code(&rec.method),
                    format::payout(Some(rec.payout_rate), ph),
                    format::machines(rec.avg_machines, ph)
                )?;
            }
        }
        if let Some(gap) = recs.payout_gap.filter(|g| g.practically_equivalent) {
            writeln!(
                out,
                "- TOP1 and 98% threshold payout differ by {} (practically equivalent)",
                format::payout(Some(gap.diff), ph)
            )?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn write_delta_table(&self, out: &mut String, table: &WindowDeltaTable) -> Result<()> {
        let (s, l) = (table.short_days, table.long_days);
        writeln!(
            out,
            "#### {}-day vs {}-day, {}",
            s,
            l,
            format::md_escape(&table.window_kind)
        )?;
        writeln!(out)?;
        writeln!(
            out,
            "| Method | {s}d TOP1 payout | {l}d TOP1 payout | Delta | {s}d 99% payout | {l}d 99% payout | Delta |"
        )?;
        writeln!(out, "|---|---|---|---|---|---|---|")?;

        let ph = self.config.placeholder.as_str();
        for delta in &table.deltas {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} | {} |",
                format::code(&format::md_escape(&delta.method)),
                format::payout(delta.single_pick_payout_short, ph),
                format::payout(delta.single_pick_payout_long, ph),
                format::signed_payout(delta.single_pick_delta, ph),
                format::payout(delta.threshold_99_payout_short, ph),
                format::payout(delta.threshold_99_payout_long, ph),
                format::signed_payout(delta.threshold_99_delta, ph),
            )?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn write_guidelines(&self, out: &mut String, guidelines: &GuidelinesSection) -> Result<()> {
        writeln!(out, "## Summary")?;
        writeln!(out)?;
        writeln!(out, "### Decision guidelines")?;
        writeln!(out)?;
        for (i, g) in guidelines.decision.iter().enumerate() {
            writeln!(out, "{}. **{}**: {}", i + 1, g.when, g.advice)?;
        }
        writeln!(out)?;
        writeln!(out, "### Query parameters")?;
        writeln!(out)?;
        for (i, line) in guidelines.query_parameters.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, line)?;
        }
        Ok(())
    }
}
