//! In-memory evaluation dataset.
//!
//! The dataset owns every loaded [`Row`]; groupings reference rows by index so
//! no row data is duplicated. The combination index is a `BTreeMap`, which
//! gives the deterministic (store, machine, window, window kind) ordering the
//! report relies on.

pub mod loader;

pub use loader::{load_csv, read_csv, LoadError, LoadStats, LoadedDataset};

use sr_common::{Combination, Row};
use std::collections::BTreeMap;

/// Loaded rows plus a combination → row-index index.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<Row>,
    index: BTreeMap<Combination, Vec<usize>>,
}

impl Dataset {
    /// Build a dataset, indexing rows by combination in input order.
    pub fn new(rows: Vec<Row>) -> Self {
        let mut index: BTreeMap<Combination, Vec<usize>> = BTreeMap::new();
        for (i, row) in rows.iter().enumerate() {
            index.entry(row.combination()).or_default().push(i);
        }
        Self { rows, index }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows of one combination, in input order. Empty if the combination is absent.
    pub fn rows_for<'a>(&'a self, combination: &Combination) -> impl Iterator<Item = &'a Row> + 'a {
        self.index
            .get(combination)
            .map(|idx| idx.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&i| &self.rows[i])
    }

    /// Distinct combinations, sorted.
    pub fn combinations(&self) -> impl Iterator<Item = &Combination> {
        self.index.keys()
    }

    /// Number of distinct combinations.
    pub fn combination_count(&self) -> usize {
        self.index.len()
    }

    pub fn contains(&self, combination: &Combination) -> bool {
        self.index.contains_key(combination)
    }
}

impl FromIterator<Row> for Dataset {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Dataset::new(iter.into_iter().collect())
    }
}
