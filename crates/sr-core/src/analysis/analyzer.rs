//! Combination analyzer: reduce one combination's rows to a per-method table.

use sr_common::{
    BucketMetrics, Combination, CombinationResult, EvaluationWindow, MethodBuckets, ResultBucket,
    Row,
};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::dataset::Dataset;

/// Analyze the combination identified by its four keys.
///
/// Returns `None` when the dataset has no rows for it.
pub fn analyze(
    dataset: &Dataset,
    store: &str,
    machine: &str,
    window: EvaluationWindow,
    window_kind: &str,
) -> Option<CombinationResult> {
    analyze_combination(dataset, &Combination::new(store, machine, window, window_kind))
}

/// Analyze one combination.
///
/// - `evaluation_days_count` comes from the first matching row; consistency
///   across rows is not checked.
/// - Methods without a TOP1 row are left out of the result.
/// - TOP1 `avg_machines` is always 1.0; threshold buckets keep the reported value.
/// - Threshold buckets without a row are omitted, not zero-filled.
/// - When a (method, bucket) slot has several rows, the first one wins.
pub fn analyze_combination(
    dataset: &Dataset,
    combination: &Combination,
) -> Option<CombinationResult> {
    let mut rows = dataset.rows_for(combination).peekable();
    let evaluation_days_count = rows.peek()?.evaluation_days_count;

    let mut slots: BTreeMap<&str, BTreeMap<ResultBucket, &Row>> = BTreeMap::new();
    for row in rows {
        let by_bucket = slots.entry(row.method.as_str()).or_default();
        if by_bucket.contains_key(&row.result_bucket) {
            trace!(
                combination = %combination,
                method = %row.method,
                bucket = %row.result_bucket,
                "Duplicate slot row ignored"
            );
            continue;
        }
        by_bucket.insert(row.result_bucket, row);
    }

    let mut methods = BTreeMap::new();
    for (method, by_bucket) in slots {
        let Some(top1) = by_bucket.get(&ResultBucket::Top1) else {
            debug!(combination = %combination, method, "Method has no TOP1 row; skipped");
            continue;
        };

        let mut buckets = MethodBuckets::new();
        buckets.insert(
            ResultBucket::Top1,
            BucketMetrics {
                avg_machines: Some(1.0),
                ..metrics_of(top1)
            },
        );
        for threshold in ResultBucket::THRESHOLDS {
            if let Some(row) = by_bucket.get(&threshold) {
                buckets.insert(threshold, metrics_of(row));
            }
        }
        methods.insert(method.to_string(), buckets);
    }

    Some(CombinationResult {
        evaluation_days_count,
        methods,
    })
}

fn metrics_of(row: &Row) -> BucketMetrics {
    BucketMetrics {
        win_rate: row.win_rate,
        payout_rate: row.payout_rate,
        avg_diff: row.avg_diff,
        avg_machines: row.avg_machines_per_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{two_method_dataset, RowBuilder};

    fn combo() -> Combination {
        Combination::new("A", "X", EvaluationWindow::Short, "espas")
    }

    #[test]
    fn test_not_found() {
        let dataset = two_method_dataset(1.5);
        assert!(analyze(&dataset, "A", "X", EvaluationWindow::Long, "espas").is_none());
        assert!(analyze(&dataset, "A", "X", EvaluationWindow::Short, "island").is_none());
        assert!(analyze(&dataset, "Z", "X", EvaluationWindow::Short, "espas").is_none());
    }

    #[test]
    fn test_two_method_scenario() {
        let dataset = two_method_dataset(1.5);
        let result = analyze(&dataset, "A", "X", EvaluationWindow::Short, "espas").unwrap();

        assert_eq!(result.evaluation_days_count, Some(58));
        assert_eq!(
            result.methods.keys().collect::<Vec<_>>(),
            vec!["m1", "m2"]
        );
        let m1 = &result.methods["m1"];
        assert_eq!(
            m1.keys().copied().collect::<Vec<_>>(),
            vec![ResultBucket::Top1, ResultBucket::Threshold98]
        );
        assert_eq!(m1[&ResultBucket::Threshold98].payout_rate, Some(81.0));
        assert_eq!(m1[&ResultBucket::Threshold98].avg_machines, Some(1.5));

        let m2 = &result.methods["m2"];
        assert_eq!(m2.len(), 1);
        assert_eq!(m2[&ResultBucket::Top1].payout_rate, Some(79.0));
    }

    #[test]
    fn test_top1_avg_machines_forced_to_one() {
        let dataset = Dataset::new(vec![RowBuilder::new("m1", ResultBucket::Top1)
            .payout(80.0)
            .machines(3.7)
            .build()]);
        let result = analyze_combination(&dataset, &combo()).unwrap();
        assert_eq!(result.methods["m1"][&ResultBucket::Top1].avg_machines, Some(1.0));
    }

    #[test]
    fn test_method_without_top1_is_skipped() {
        let dataset = Dataset::new(vec![
            RowBuilder::new("m1", ResultBucket::Top1).payout(80.0).build(),
            RowBuilder::new("m3", ResultBucket::Threshold99)
                .payout(90.0)
                .machines(1.0)
                .build(),
        ]);
        let result = analyze_combination(&dataset, &combo()).unwrap();
        assert!(result.methods.contains_key("m1"));
        assert!(!result.methods.contains_key("m3"));
    }

    #[test]
    fn test_only_threshold_rows_yield_empty_methods() {
        let dataset = Dataset::new(vec![RowBuilder::new("m1", ResultBucket::Threshold95)
            .payout(90.0)
            .build()]);
        let result = analyze_combination(&dataset, &combo()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let dataset = Dataset::new(vec![
            RowBuilder::new("m1", ResultBucket::Top1).payout(80.0).build(),
            RowBuilder::new("m1", ResultBucket::Top1).payout(99.0).build(),
            RowBuilder::new("m1", ResultBucket::Threshold97)
                .payout(85.0)
                .build(),
            RowBuilder::new("m1", ResultBucket::Threshold97)
                .payout(10.0)
                .build(),
        ]);
        let result = analyze_combination(&dataset, &combo()).unwrap();
        assert_eq!(result.payout_rate("m1", ResultBucket::Top1), Some(80.0));
        assert_eq!(result.payout_rate("m1", ResultBucket::Threshold97), Some(85.0));
    }

    #[test]
    fn test_days_count_from_first_row() {
        let dataset = Dataset::new(vec![
            RowBuilder::new("m2", ResultBucket::Top1)
                .days_count(Some(57))
                .build(),
            RowBuilder::new("m1", ResultBucket::Top1)
                .days_count(Some(59))
                .build(),
        ]);
        let result = analyze_combination(&dataset, &combo()).unwrap();
        assert_eq!(result.evaluation_days_count, Some(57));
    }

    #[test]
    fn test_missing_metrics_preserved() {
        let dataset = Dataset::new(vec![RowBuilder::new("m1", ResultBucket::Top1)
            .win(50.0)
            .build()]);
        let result = analyze_combination(&dataset, &combo()).unwrap();
        let top1 = result.methods["m1"][&ResultBucket::Top1];
        assert_eq!(top1.win_rate, Some(50.0));
        assert_eq!(top1.payout_rate, None);
        assert_eq!(top1.avg_diff, None);
    }

    #[test]
    fn test_idempotent() {
        let dataset = two_method_dataset(1.5);
        let a = analyze_combination(&dataset, &combo());
        let b = analyze_combination(&dataset, &combo());
        assert_eq!(a, b);
    }
}
