// src/transform.rs
use crate::series::CountrySeries;
use crate::table::Metric;
use tracing::debug;

/// Metrics that get a percent-change panel, top to bottom.
pub const CHANGE_METRICS: [Metric; 2] = [Metric::Confirmed, Metric::Deaths];

/// Day-over-day percent change of one metric, aligned with the series dates.
#[derive(Clone, Debug, PartialEq)]
pub struct PercentChange {
    pub metric: Metric,
    /// `None` at index 0; later values may be non-finite after a zero.
    pub values: Vec<Option<f64>>,
}

impl PercentChange {
    /// Trace label, e.g. `%change Confirmed`.
    pub fn label(&self) -> String {
        format!("%change {}", self.metric)
    }
}

/// `100 * (v[i] - v[i-1]) / v[i-1]` rounded to one decimal.
///
/// Gaps are padded with the previous observation first. A zero predecessor
/// is left to IEEE-754 and produces `inf` or `NaN`.
pub fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    let filled = pad(values);
    std::iter::once(None)
        .chain(
            filled
                .windows(2)
                .map(|w| Some(round_one_decimal(100.0 * (w[1] - w[0]) / w[0]))),
        )
        .take(values.len())
        .collect()
}

/// Round half to even at the first decimal.
pub fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round_ties_even() / 10.0
}

/// Forward-fill `NaN` gaps; leading gaps stay `NaN`.
fn pad(values: &[f64]) -> Vec<f64> {
    let mut last = f64::NAN;
    values
        .iter()
        .map(|&v| {
            if !v.is_nan() {
                last = v;
            }
            last
        })
        .collect()
}

/// Percent change for each requested metric of `series`.
pub fn derive_changes(series: &CountrySeries, metrics: &[Metric]) -> Vec<PercentChange> {
    metrics
        .iter()
        .map(|&metric| {
            let values = pct_change(series.metric(metric));
            debug!(%metric, points = values.len(), "derived percent change");
            PercentChange { metric, values }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn first_value_is_missing() {
        assert_eq!(pct_change(&[5.0, 10.0]), vec![None, Some(100.0)]);
        assert_eq!(pct_change(&[7.0]), vec![None]);
        assert!(pct_change(&[]).is_empty());
    }

    #[test]
    fn matches_rounded_formula() {
        let v = [3.0, 4.0, 5.0, 5.0, 4.0];
        let got = pct_change(&v);
        for i in 1..v.len() {
            let expected = round_one_decimal(100.0 * (v[i] - v[i - 1]) / v[i - 1]);
            assert_eq!(got[i], Some(expected));
        }
        assert_eq!(got[1], Some(33.3));
        assert_eq!(got[2], Some(25.0));
        assert_eq!(got[3], Some(0.0));
        assert_eq!(got[4], Some(-20.0));
    }

    #[test]
    fn exact_ties_use_the_difference() {
        // -51 / 80 is exactly -63.75; the ratio form lands just above it
        assert_eq!(pct_change(&[80.0, 29.0]), vec![None, Some(-63.8)]);
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(round_one_decimal(0.25), 0.2);
        assert_eq!(round_one_decimal(0.75), 0.8);
        assert_eq!(round_one_decimal(-1.25), -1.2);
    }

    #[test]
    fn zero_predecessor_is_not_guarded() {
        let got = pct_change(&[0.0, 0.0, 3.0]);
        assert_eq!(got[0], None);
        assert!(got[1].unwrap().is_nan());
        assert_eq!(got[2], Some(f64::INFINITY));
    }

    #[test]
    fn gaps_are_padded() {
        let got = pct_change(&[f64::NAN, 2.0, f64::NAN, 4.0]);
        assert_eq!(got[0], None);
        assert!(got[1].unwrap().is_nan());
        assert_eq!(got[2], Some(0.0));
        assert_eq!(got[3], Some(100.0));
    }

    #[test]
    fn derives_requested_metrics_in_order() {
        let d = |day| NaiveDate::from_ymd_opt(2020, 3, day).unwrap();
        let series = CountrySeries {
            category: "Chile".into(),
            dates: vec![d(1), d(2)],
            confirmed: vec![5.0, 10.0],
            recovered: vec![0.0, 1.0],
            deaths: vec![2.0, 3.0],
        };
        let changes = derive_changes(&series, &CHANGE_METRICS);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].metric, Metric::Confirmed);
        assert_eq!(changes[0].values, vec![None, Some(100.0)]);
        assert_eq!(changes[1].label(), "%change Deaths");
        assert_eq!(changes[1].values, vec![None, Some(50.0)]);
    }
}
