//! Method comparator: flatten a combination result over the focus buckets.

use sr_common::{BucketMetrics, CombinationResult, ComparisonRow, FocusCell, ResultBucket};

/// One row per method, sorted by method name; one cell per focus bucket.
///
/// A bucket the method has no data for yields a cell with all four metrics
/// missing, never zeros.
pub fn compare(result: &CombinationResult, focus_buckets: &[ResultBucket]) -> Vec<ComparisonRow> {
    result
        .methods
        .iter()
        .map(|(method, buckets)| ComparisonRow {
            method: method.clone(),
            cells: focus_buckets
                .iter()
                .map(|&bucket| FocusCell {
                    bucket,
                    metrics: buckets
                        .get(&bucket)
                        .copied()
                        .unwrap_or_else(BucketMetrics::missing),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_combination;
    use crate::dataset::Dataset;
    use crate::test_utils::{two_method_dataset, RowBuilder};
    use sr_common::{Combination, EvaluationWindow};

    const FOCUS: [ResultBucket; 3] = [
        ResultBucket::Top1,
        ResultBucket::Threshold98,
        ResultBucket::Threshold99,
    ];

    fn combo() -> Combination {
        Combination::new("A", "X", EvaluationWindow::Short, "espas")
    }

    #[test]
    fn test_one_row_per_method_sorted() {
        let dataset = Dataset::new(vec![
            RowBuilder::new("zeta", ResultBucket::Top1).payout(70.0).build(),
            RowBuilder::new("alpha", ResultBucket::Top1).payout(75.0).build(),
            RowBuilder::new("mid", ResultBucket::Top1).payout(72.0).build(),
        ]);
        let result = analyze_combination(&dataset, &combo()).unwrap();
        let rows = compare(&result, &FOCUS);
        let methods: Vec<_> = rows.iter().map(|r| r.method.as_str()).collect();
        assert_eq!(methods, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_absent_bucket_is_explicitly_missing() {
        let result = analyze_combination(&two_method_dataset(1.5), &combo()).unwrap();
        let rows = compare(&result, &FOCUS);

        let m2 = &rows[1];
        assert_eq!(m2.method, "m2");
        assert_eq!(m2.cells.len(), 3);
        assert_eq!(m2.cell(ResultBucket::Top1).unwrap().payout_rate, Some(79.0));
        assert!(m2.cell(ResultBucket::Threshold98).unwrap().is_missing());
        assert!(m2.cell(ResultBucket::Threshold99).unwrap().is_missing());

        let m1 = &rows[0];
        let th98 = m1.cell(ResultBucket::Threshold98).unwrap();
        assert_eq!(th98.win_rate, Some(57.0));
        assert_eq!(th98.payout_rate, Some(81.0));
        assert_eq!(th98.avg_diff, Some(-90.0));
        assert_eq!(th98.avg_machines, Some(1.5));
    }

    #[test]
    fn test_focus_order_is_preserved() {
        let result = analyze_combination(&two_method_dataset(1.5), &combo()).unwrap();
        let focus = [ResultBucket::Threshold98, ResultBucket::Top1];
        let rows = compare(&result, &focus);
        let buckets: Vec<_> = rows[0].cells.iter().map(|c| c.bucket).collect();
        assert_eq!(buckets, focus.to_vec());
        assert!(rows[0].cell(ResultBucket::Threshold99).is_none());
    }

    #[test]
    fn test_empty_result_yields_no_rows() {
        assert!(compare(&CombinationResult::default(), &FOCUS).is_empty());
    }
}
