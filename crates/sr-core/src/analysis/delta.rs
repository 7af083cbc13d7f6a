//! Window delta calculator: short vs long payout per method.

use sr_common::{CombinationResult, ResultBucket, WindowDelta};
use std::collections::BTreeSet;

/// Per-method payout deltas between a short-window and a long-window result.
///
/// Covers the union of methods, sorted by name. A delta is `long − short` and
/// is only computed when both payouts are present and non-zero. A payout of
/// exactly zero is treated like a missing one.
pub fn compare_windows(short: &CombinationResult, long: &CombinationResult) -> Vec<WindowDelta> {
    let methods: BTreeSet<&String> = short.methods.keys().chain(long.methods.keys()).collect();

    methods
        .into_iter()
        .map(|method| {
            let top1_short = short.payout_rate(method, ResultBucket::Top1);
            let top1_long = long.payout_rate(method, ResultBucket::Top1);
            let th99_short = short.payout_rate(method, ResultBucket::Threshold99);
            let th99_long = long.payout_rate(method, ResultBucket::Threshold99);

            WindowDelta {
                method: method.clone(),
                single_pick_payout_short: top1_short,
                single_pick_payout_long: top1_long,
                single_pick_delta: delta(top1_short, top1_long),
                threshold_99_payout_short: th99_short,
                threshold_99_payout_long: th99_long,
                threshold_99_delta: delta(th99_short, th99_long),
            }
        })
        .collect()
}

fn delta(short: Option<f64>, long: Option<f64>) -> Option<f64> {
    let nonzero = |v: Option<f64>| v.filter(|x| *x != 0.0);
    Some(nonzero(long)? - nonzero(short)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sr_common::{BucketMetrics, MethodBuckets};

    fn result(entries: &[(&str, ResultBucket, Option<f64>)]) -> CombinationResult {
        let mut result = CombinationResult::default();
        for (method, bucket, payout) in entries {
            result
                .methods
                .entry(method.to_string())
                .or_insert_with(MethodBuckets::new)
                .insert(
                    *bucket,
                    BucketMetrics {
                        payout_rate: *payout,
                        ..BucketMetrics::missing()
                    },
                );
        }
        result
    }

    #[test]
    fn test_single_pick_delta() {
        let short = result(&[("m1", ResultBucket::Top1, Some(80.0))]);
        let long = result(&[("m1", ResultBucket::Top1, Some(82.0))]);
        let deltas = compare_windows(&short, &long);
        assert_eq!(deltas.len(), 1);
        crate::assert_approx_eq!(deltas[0].single_pick_delta.unwrap(), 2.0);
        assert_eq!(deltas[0].threshold_99_delta, None);
    }

    #[test]
    fn test_sign_is_long_minus_short() {
        let short = result(&[("m1", ResultBucket::Threshold99, Some(90.0))]);
        let long = result(&[("m1", ResultBucket::Threshold99, Some(85.5))]);
        let deltas = compare_windows(&short, &long);
        crate::assert_approx_eq!(deltas[0].threshold_99_delta.unwrap(), -4.5);
    }

    #[test]
    fn test_union_of_methods_sorted() {
        let short = result(&[
            ("m3", ResultBucket::Top1, Some(80.0)),
            ("m1", ResultBucket::Top1, Some(80.0)),
        ]);
        let long = result(&[("m2", ResultBucket::Top1, Some(82.0))]);
        let deltas = compare_windows(&short, &long);
        let methods: Vec<_> = deltas.iter().map(|d| d.method.as_str()).collect();
        assert_eq!(methods, vec!["m1", "m2", "m3"]);
        assert!(deltas.iter().all(|d| d.single_pick_delta.is_none()));
        assert_eq!(deltas[1].single_pick_payout_long, Some(82.0));
        assert_eq!(deltas[1].single_pick_payout_short, None);
    }

    #[test]
    fn test_zero_payout_suppresses_delta() {
        let short = result(&[("m1", ResultBucket::Top1, Some(0.0))]);
        let long = result(&[("m1", ResultBucket::Top1, Some(82.0))]);
        let deltas = compare_windows(&short, &long);
        assert_eq!(deltas[0].single_pick_payout_short, Some(0.0));
        assert_eq!(deltas[0].single_pick_delta, None);
    }

    #[test]
    fn test_missing_payout_suppresses_delta() {
        let short = result(&[("m1", ResultBucket::Top1, None)]);
        let long = result(&[("m1", ResultBucket::Top1, Some(82.0))]);
        assert_eq!(compare_windows(&short, &long)[0].single_pick_delta, None);
    }

    #[test]
    fn test_empty_inputs() {
        let empty = CombinationResult::default();
        assert!(compare_windows(&empty, &empty).is_empty());
    }
}
