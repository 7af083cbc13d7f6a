//! Test utilities for sr-core.
//!
//! Provides a row builder and CSV fixture helpers shared by unit tests.

use sr_common::{EvaluationWindow, ResultBucket, Row};

use crate::dataset::Dataset;

/// Assert that two floating point numbers are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr) => {
        $crate::assert_approx_eq!($a, $b, 1e-9_f64)
    };
    ($a:expr, $b:expr, $epsilon:expr) => {{
        let a: f64 = $a;
        let b: f64 = $b;
        let eps: f64 = $epsilon;
        let diff = (a - b).abs();
        assert!(
            diff <= eps,
            "assertion failed: {} ≈ {} (diff = {}, epsilon = {})",
            a,
            b,
            diff,
            eps
        );
    }};
}

/// Builder for [`Row`] with defaults: store `A`, machine `X`, short window,
/// window kind `espas`, 58 evaluated days, all metrics missing.
#[derive(Debug, Clone)]
pub struct RowBuilder {
    row: Row,
}

impl RowBuilder {
    pub fn new(method: &str, bucket: ResultBucket) -> Self {
        Self {
            row: Row {
                store: "A".to_string(),
                machine: "X".to_string(),
                evaluation_window: EvaluationWindow::Short,
                window_kind: "espas".to_string(),
                evaluation_days_count: Some(58),
                method: method.to_string(),
                result_bucket: bucket,
                win_rate: None,
                payout_rate: None,
                avg_diff: None,
                avg_machines_per_day: None,
            },
        }
    }

    pub fn store(mut self, store: &str) -> Self {
        self.row.store = store.to_string();
        self
    }

    pub fn machine(mut self, machine: &str) -> Self {
        self.row.machine = machine.to_string();
        self
    }

    pub fn window(mut self, window: EvaluationWindow) -> Self {
        self.row.evaluation_window = window;
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.row.window_kind = kind.to_string();
        self
    }

    pub fn days_count(mut self, days: Option<u32>) -> Self {
        self.row.evaluation_days_count = days;
        self
    }

    pub fn win(mut self, win_rate: f64) -> Self {
        self.row.win_rate = Some(win_rate);
        self
    }

    pub fn payout(mut self, payout_rate: f64) -> Self {
        self.row.payout_rate = Some(payout_rate);
        self
    }

    pub fn diff(mut self, avg_diff: f64) -> Self {
        self.row.avg_diff = Some(avg_diff);
        self
    }

    pub fn machines(mut self, avg_machines: f64) -> Self {
        self.row.avg_machines_per_day = Some(avg_machines);
        self
    }

    pub fn build(self) -> Row {
        self.row
    }
}

/// Two-method dataset for store A / machine X / short / espas:
/// `m1` has TOP1 80.0 and a 98% bucket at 81.0 with `m1_th98_machines`
/// machines per day; `m2` has TOP1 79.0 and no 98% bucket.
pub fn two_method_dataset(m1_th98_machines: f64) -> Dataset {
    Dataset::new(vec![
        RowBuilder::new("m1", ResultBucket::Top1)
            .win(55.0)
            .payout(80.0)
            .diff(-150.0)
            .build(),
        RowBuilder::new("m1", ResultBucket::Threshold98)
            .win(57.0)
            .payout(81.0)
            .diff(-90.0)
            .machines(m1_th98_machines)
            .build(),
        RowBuilder::new("m2", ResultBucket::Top1)
            .win(54.0)
            .payout(79.0)
            .diff(-180.0)
            .build(),
    ])
}

/// CSV header in the export's column order.
pub const CSV_HEADER: &str = "target_hole,target_machine,evaluation_days,special_day_type,evaluation_days_count,score_method,result_key,win_rate,payout_rate,avg_diff,avg_machines_per_day";

/// A small but complete export: two stores, both windows for store A.
pub fn sample_csv() -> String {
    let body = [
        "A,X,60,espas,58,m1,TOP1,55.0,80.0,-150,",
        "A,X,60,espas,58,m1,THRESHOLD_98PCT,57.0,81.0,-90,1.5",
        "A,X,60,espas,58,m1,THRESHOLD_99PCT,58.0,83.0,-70,1.2",
        "A,X,60,espas,58,m2,TOP1,54.0,79.0,-180,",
        "A,X,120,espas,116,m1,TOP1,53.0,82.0,-100,",
        "A,X,120,espas,116,m1,THRESHOLD_99PCT,56.0,84.5,-60,1.1",
        "A,X,120,espas,116,m2,TOP1,52.0,78.5,-190,",
        "B,Y,60,island,59,m1,TOP1,50.0,97.0,-20,",
    ];
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for line in body {
        csv.push_str(line);
        csv.push('\n');
    }
    csv
}
