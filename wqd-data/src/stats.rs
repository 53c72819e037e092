//! Box-plot summary statistics.
//!
//! Quartiles use linear interpolation between order statistics (the R-7
//! definition): for `n` sorted values and fraction `p`, take
//! `h = (n - 1) * p` and interpolate between `x[floor(h)]` and
//! `x[floor(h) + 1]`.

use crate::group::Groups;
use serde::Serialize;
use std::cmp::Ordering;
use wqd_utils::text::locale_cmp;

/// Groups with fewer observations than this are left out of box plots.
pub const DEFAULT_MIN_COUNT: usize = 10;

/// R-7 quantile of an ascending slice. `None` for an empty slice.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if p <= 0.0 || n < 2 {
        return Some(sorted[0]);
    }
    if p >= 1.0 {
        return Some(sorted[n - 1]);
    }
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let lower = sorted[lo];
    let upper = sorted[lo + 1];
    Some(lower + (upper - lower) * (h - lo as f64))
}

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Five-number summary plus mean and count for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Group label (site or parameter name).
    pub label: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub mean: f64,
    pub q3: f64,
    pub max: f64,
}

impl SummaryStats {
    /// Summarize a group. `None` when `values` is empty.
    pub fn compute(label: &str, values: &[f64]) -> Option<SummaryStats> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        Some(SummaryStats {
            label: label.to_string(),
            count: sorted.len(),
            min: *sorted.first()?,
            q1: quantile_sorted(&sorted, 0.25)?,
            median: quantile_sorted(&sorted, 0.5)?,
            mean: mean(&sorted)?,
            q3: quantile_sorted(&sorted, 0.75)?,
            max: *sorted.last()?,
        })
    }
}

/// Summarize every group holding at least `min_count` observations, sorted
/// by label. Labels that collate equal keep their first-seen order.
pub fn summarize_groups(groups: &Groups, min_count: usize) -> Vec<SummaryStats> {
    let mut out: Vec<SummaryStats> = groups
        .iter()
        .filter(|(_, values)| values.len() >= min_count)
        .filter_map(|(label, values)| SummaryStats::compute(label, values))
        .collect();
    out.sort_by(|a, b| locale_cmp(&a.label, &b.label));
    log::debug!(
        "[WQD] stats: {} of {} groups meet n >= {}",
        out.len(),
        groups.len(),
        min_count
    );
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn values(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(-1e6_f64..1e6, min_len..=max_len)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn five_numbers_are_ordered(data in values(1, 100)) {
            let stats = SummaryStats::compute("g", &data).unwrap();
            let tol = 1e-9 * stats.max.abs().max(stats.min.abs()).max(1.0);
            prop_assert_eq!(stats.count, data.len());
            prop_assert!(stats.min <= stats.q1 + tol);
            prop_assert!(stats.q1 <= stats.median + tol);
            prop_assert!(stats.median <= stats.q3 + tol);
            prop_assert!(stats.q3 <= stats.max + tol);
            prop_assert!(stats.min <= stats.mean + tol && stats.mean <= stats.max + tol);
        }

        #[test]
        fn quantiles_are_monotonic(
            mut data in values(2, 100),
            p1 in 0.0_f64..=1.0,
            p2 in 0.0_f64..=1.0,
        ) {
            data.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
            let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
            let q_lo = quantile_sorted(&data, lo).unwrap();
            let q_hi = quantile_sorted(&data, hi).unwrap();
            prop_assert!(q_lo <= q_hi + 1e-6);
        }

        #[test]
        fn summaries_respect_min_count(
            sizes in proptest::collection::vec(0_usize..15, 1..8),
            min_count in 1_usize..12,
        ) {
            let mut groups = Groups::default();
            for (i, n) in sizes.iter().enumerate() {
                for v in 0..*n {
                    groups.push(format!("site {}", i), v as f64);
                }
            }
            let out = summarize_groups(&groups, min_count);
            let expected = sizes.iter().filter(|n| **n >= min_count).count();
            prop_assert_eq!(out.len(), expected);
            prop_assert!(out.iter().all(|s| s.count >= min_count));
            prop_assert!(out.windows(2).all(|w| locale_cmp(&w[0].label, &w[1].label) != Ordering::Greater));
        }
    }
}
