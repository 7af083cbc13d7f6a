//! Report assembly: run every analysis stage and build the document.

use chrono::Utc;
use sr_common::{Combination, CombinationResult, EvaluationWindow};
use sr_config::AnalysisConfig;
use sr_report::sections::{
    GuidelinesSection, InputSummary, MachineSection, OverviewSection, StoreMachines,
    StoreSection, WindowAnalysis, WindowDeltaTable, WindowSpan,
};
use sr_report::{ReportConfig, ReportDocument};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use crate::analysis::{analyze_combination, compare, compare_windows, select_best};
use crate::dataset::{Dataset, LoadedDataset};
use crate::groups;

impl From<&LoadedDataset> for InputSummary {
    fn from(loaded: &LoadedDataset) -> Self {
        InputSummary {
            path: loaded.path.display().to_string(),
            sha256: loaded.sha256.clone(),
            rows_read: loaded.stats.rows_read,
            rows_loaded: loaded.stats.rows_loaded,
            skipped_malformed: loaded.stats.skipped_malformed,
            skipped_unknown_window: loaded.stats.skipped_unknown_window,
            skipped_unknown_bucket: loaded.stats.skipped_unknown_bucket,
        }
    }
}

/// Builds a [`ReportDocument`] from a dataset.
pub struct ReportAssembler<'a> {
    config: &'a AnalysisConfig,
    title: String,
    guidelines: bool,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self {
            config,
            title: ReportConfig::DEFAULT_TITLE.to_string(),
            guidelines: true,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_guidelines(mut self, enabled: bool) -> Self {
        self.guidelines = enabled;
        self
    }

    /// Walk store → machine → (window, kind), analyzing each combination and
    /// pairing short and long results of the same kind.
    pub fn assemble(&self, dataset: &Dataset, input: InputSummary) -> ReportDocument {
        let stores: Vec<StoreSection> = groups::group_tree(dataset)
            .into_iter()
            .map(|(store, machines)| StoreSection {
                machines: machines
                    .into_iter()
                    .map(|(machine, kinds)| self.machine_section(dataset, &store, machine, &kinds))
                    .collect(),
                store,
            })
            .collect();

        let document = ReportDocument {
            schema_version: sr_common::SCHEMA_VERSION.to_string(),
            title: self.title.clone(),
            generated_at: Utc::now(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            run_id: None,
            focus_buckets: self.config.focus_buckets.clone(),
            overview: self.overview(dataset, input),
            stores,
            guidelines: self.guidelines.then(|| {
                GuidelinesSection::standard(&self.config.selection, &self.config.windows)
            }),
            config: None,
        };

        info!(
            stores = document.overview.store_count(),
            combinations = document.overview.combinations,
            recommendations = document.recommendation_count(),
            "Assembled report"
        );
        document
    }

    fn machine_section(
        &self,
        dataset: &Dataset,
        store: &str,
        machine: String,
        kinds: &groups::KindWindows,
    ) -> MachineSection {
        let mut slots: Vec<(EvaluationWindow, &String)> = kinds
            .iter()
            .flat_map(|(kind, windows)| windows.iter().map(move |w| (*w, kind)))
            .collect();
        slots.sort();

        let mut results: BTreeMap<(EvaluationWindow, &str), CombinationResult> = BTreeMap::new();
        let mut windows = Vec::with_capacity(slots.len());

        for (window, kind) in slots {
            let combination = Combination::new(store, machine.as_str(), window, kind.as_str());
            let Some(result) = analyze_combination(dataset, &combination) else {
                continue;
            };
            debug!(
                combination = %combination,
                methods = result.method_count(),
                "Analyzed combination"
            );
            windows.push(WindowAnalysis {
                window,
                days: self.config.windows.days(window),
                window_kind: kind.clone(),
                evaluation_days_count: result.evaluation_days_count,
                comparison: compare(&result, &self.config.focus_buckets),
                recommendations: select_best(&result, &self.config.selection),
            });
            results.insert((window, kind.as_str()), result);
        }

        let window_deltas = kinds
            .keys()
            .filter_map(|kind| {
                let short = results.get(&(EvaluationWindow::Short, kind.as_str()))?;
                let long = results.get(&(EvaluationWindow::Long, kind.as_str()))?;
                Some(WindowDeltaTable {
                    window_kind: kind.clone(),
                    short_days: self.config.windows.short_days,
                    long_days: self.config.windows.long_days,
                    deltas: compare_windows(short, long),
                })
            })
            .collect();

        MachineSection {
            machine,
            windows,
            window_deltas,
        }
    }

    fn overview(&self, dataset: &Dataset, input: InputSummary) -> OverviewSection {
        let stores = groups::machines_by_store(dataset)
            .into_iter()
            .map(|(store, machines)| StoreMachines {
                store,
                machines: machines.into_iter().collect(),
            })
            .collect();
        let methods: BTreeSet<&str> = dataset.rows().iter().map(|r| r.method.as_str()).collect();

        OverviewSection {
            input,
            stores,
            windows: [EvaluationWindow::Short, EvaluationWindow::Long]
                .into_iter()
                .map(|window| WindowSpan {
                    window,
                    days: self.config.windows.days(window),
                })
                .collect(),
            combinations: dataset.combination_count(),
            methods: methods.into_iter().map(str::to_string).collect(),
        }
    }
}
