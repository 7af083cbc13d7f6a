//! Group extraction over a loaded dataset.
//!
//! Everything here is sorted lexicographically so the report lists stores,
//! machines and windows in the same order on every run.

use sr_common::{Combination, EvaluationWindow};
use std::collections::{BTreeMap, BTreeSet};

use crate::dataset::Dataset;

/// Distinct (store, machine, window, window kind) combinations, sorted.
pub fn combinations(dataset: &Dataset) -> Vec<Combination> {
    dataset.combinations().cloned().collect()
}

/// Store → distinct machines.
pub fn machines_by_store(dataset: &Dataset) -> BTreeMap<String, BTreeSet<String>> {
    let mut out: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for combo in dataset.combinations() {
        out.entry(combo.store.clone())
            .or_default()
            .insert(combo.machine.clone());
    }
    out
}

/// Windows observed for one store/machine, keyed by window kind.
pub type KindWindows = BTreeMap<String, BTreeSet<EvaluationWindow>>;

/// Store → machine → window kind → windows present.
///
/// This is the traversal order of the report: the assembler walks it to
/// emit per-window analyses and to pair short and long windows of the
/// same kind.
pub fn group_tree(dataset: &Dataset) -> BTreeMap<String, BTreeMap<String, KindWindows>> {
    let mut tree: BTreeMap<String, BTreeMap<String, KindWindows>> = BTreeMap::new();
    for combo in dataset.combinations() {
        tree.entry(combo.store.clone())
            .or_default()
            .entry(combo.machine.clone())
            .or_default()
            .entry(combo.window_kind.clone())
            .or_default()
            .insert(combo.window);
    }
    tree
}
