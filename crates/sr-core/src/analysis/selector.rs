//! Recommendation selector: pick the best method per bucket kind.
//!
//! Candidates with a missing payout rate (or, for threshold buckets, a
//! missing average machine count) are never considered. Methods are scanned
//! in name order and only a strictly higher payout replaces the current
//! pick, so ties go to the lexicographically first method.

use sr_common::{CombinationResult, PayoutGap, Recommendation, Recommendations, ResultBucket};
use sr_config::{MachineRange, SelectionConfig};

/// Select the best single-pick, 98% and 99% methods for one combination.
pub fn select_best(result: &CombinationResult, selection: &SelectionConfig) -> Recommendations {
    let single_pick = best_in_bucket(result, ResultBucket::Top1, None);
    let threshold_98 = best_in_bucket(
        result,
        ResultBucket::Threshold98,
        Some(&selection.threshold_98),
    );
    let threshold_99 = best_in_bucket(
        result,
        ResultBucket::Threshold99,
        Some(&selection.threshold_99),
    );

    let payout_gap = match (&single_pick, &threshold_98) {
        (Some(top1), Some(th98)) => {
            let diff = top1.payout_rate - th98.payout_rate;
            Some(PayoutGap {
                diff,
                practically_equivalent: diff.abs() < selection.equivalence_margin,
            })
        }
        _ => None,
    };

    Recommendations {
        single_pick,
        threshold_98,
        threshold_99,
        payout_gap,
    }
}

/// Highest payout in `bucket`, restricted to methods whose average machine
/// count lies in `range` when one is given.
fn best_in_bucket(
    result: &CombinationResult,
    bucket: ResultBucket,
    range: Option<&MachineRange>,
) -> Option<Recommendation> {
    let mut best: Option<Recommendation> = None;

    for (method, buckets) in &result.methods {
        let Some(metrics) = buckets.get(&bucket) else {
            continue;
        };
        let Some(payout_rate) = metrics.payout_rate else {
            continue;
        };
        if let Some(range) = range {
            match metrics.avg_machines {
                Some(avg) if range.contains(avg) => {}
                _ => continue,
            }
        }
        if best.as_ref().map_or(true, |b| payout_rate > b.payout_rate) {
            best = Some(Recommendation {
                bucket,
                method: method.clone(),
                payout_rate,
                avg_machines: metrics.avg_machines,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_combination;
    use crate::dataset::Dataset;
    use crate::test_utils::{two_method_dataset, RowBuilder};
    use sr_common::{Combination, EvaluationWindow};

    fn combo() -> Combination {
        Combination::new("A", "X", EvaluationWindow::Short, "espas")
    }

    fn select(dataset: &Dataset) -> Recommendations {
        let result = analyze_combination(dataset, &combo()).unwrap();
        select_best(&result, &SelectionConfig::default())
    }

    #[test]
    fn test_two_method_scenario() {
        let recs = select(&two_method_dataset(1.5));

        let single = recs.single_pick.as_ref().unwrap();
        assert_eq!(single.method, "m1");
        assert_eq!(single.payout_rate, 80.0);

        let th98 = recs.threshold_98.as_ref().unwrap();
        assert_eq!(th98.method, "m1");
        assert_eq!(th98.payout_rate, 81.0);
        assert_eq!(th98.avg_machines, Some(1.5));

        assert!(recs.threshold_99.is_none());
    }

    #[test]
    fn test_threshold_98_out_of_range_is_excluded() {
        let recs = select(&two_method_dataset(2.5));
        assert!(recs.threshold_98.is_none());
        assert!(recs.payout_gap.is_none());
        assert_eq!(recs.single_pick.unwrap().method, "m1");
    }

    #[test]
    fn test_disqualified_higher_payout_loses() {
        let dataset = Dataset::new(vec![
            RowBuilder::new("a", ResultBucket::Top1).payout(80.0).build(),
            RowBuilder::new("a", ResultBucket::Threshold98)
                .payout(95.0)
                .machines(2.2)
                .build(),
            RowBuilder::new("b", ResultBucket::Top1).payout(80.0).build(),
            RowBuilder::new("b", ResultBucket::Threshold98)
                .payout(85.0)
                .machines(2.0)
                .build(),
            RowBuilder::new("c", ResultBucket::Top1).payout(80.0).build(),
            RowBuilder::new("c", ResultBucket::Threshold98)
                .payout(99.0)
                .machines(0.8)
                .build(),
        ]);
        let th98 = select(&dataset).threshold_98.unwrap();
        assert_eq!(th98.method, "b");
        assert_eq!(th98.payout_rate, 85.0);
    }

    #[test]
    fn test_threshold_99_uses_narrower_range() {
        let dataset = Dataset::new(vec![
            RowBuilder::new("a", ResultBucket::Top1).payout(80.0).build(),
            RowBuilder::new("a", ResultBucket::Threshold99)
                .payout(95.0)
                .machines(1.6)
                .build(),
            RowBuilder::new("b", ResultBucket::Top1).payout(80.0).build(),
            RowBuilder::new("b", ResultBucket::Threshold99)
                .payout(88.0)
                .machines(1.5)
                .build(),
        ]);
        let th99 = select(&dataset).threshold_99.unwrap();
        assert_eq!(th99.method, "b");
        assert_eq!(th99.bucket, ResultBucket::Threshold99);
    }

    #[test]
    fn test_missing_values_are_excluded() {
        let dataset = Dataset::new(vec![
            RowBuilder::new("a", ResultBucket::Top1).build(),
            RowBuilder::new("a", ResultBucket::Threshold98)
                .payout(99.0)
                .build(),
            RowBuilder::new("b", ResultBucket::Top1).payout(-5.0).build(),
        ]);
        let recs = select(&dataset);
        assert_eq!(recs.single_pick.unwrap().method, "b");
        assert!(recs.threshold_98.is_none());
    }

    #[test]
    fn test_tie_goes_to_first_method_by_name() {
        let dataset = Dataset::new(vec![
            RowBuilder::new("beta", ResultBucket::Top1).payout(80.0).build(),
            RowBuilder::new("alpha", ResultBucket::Top1).payout(80.0).build(),
        ]);
        assert_eq!(select(&dataset).single_pick.unwrap().method, "alpha");
    }

    #[test]
    fn test_payout_gap_equivalence_flag() {
        // TOP1 80.0 vs 98% 81.0: diff -1.0 is not below the 1.0 margin.
        let recs = select(&two_method_dataset(1.5));
        let gap = recs.payout_gap.unwrap();
        crate::assert_approx_eq!(gap.diff, -1.0);
        assert!(!gap.practically_equivalent);

        let dataset = Dataset::new(vec![
            RowBuilder::new("m1", ResultBucket::Top1).payout(80.0).build(),
            RowBuilder::new("m2", ResultBucket::Top1).payout(70.0).build(),
            RowBuilder::new("m2", ResultBucket::Threshold98)
                .payout(79.5)
                .machines(1.8)
                .build(),
        ]);
        let recs = select(&dataset);
        let gap = recs.payout_gap.unwrap();
        crate::assert_approx_eq!(gap.diff, 0.5);
        assert!(gap.practically_equivalent);
        // The flag never changes the picks.
        assert_eq!(recs.single_pick.unwrap().method, "m1");
        assert_eq!(recs.threshold_98.unwrap().method, "m2");
    }

    #[test]
    fn test_custom_ranges() {
        let mut selection = SelectionConfig::default();
        selection.threshold_98 = MachineRange::new(2.0, 3.0);
        let result = analyze_combination(&two_method_dataset(2.5), &combo()).unwrap();
        let recs = select_best(&result, &selection);
        assert_eq!(recs.threshold_98.unwrap().method, "m1");
    }

    #[test]
    fn test_empty_result() {
        let recs = select_best(&CombinationResult::default(), &SelectionConfig::default());
        assert_eq!(recs, Recommendations::default());
        assert_eq!(recs.count(), 0);
    }
}
