//! Series assembly for line charts.
//!
//! Two shapes come out of here: the wide per-date table behind the
//! multi-site time-series chart, and the single-series daily means behind
//! the river level chart.

use crate::group::DateBuckets;
use crate::stats::mean;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use wqd_core::{Columns, RawRecord};
use wqd_utils::dates::{normalize_date, NormalizedDate};
use wqd_utils::text::normalize_key;

/// One row of the wide table: a date plus one column per series that had
/// data that day. Series without data are missing keys, not zeros.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WideSeriesRow {
    /// `MM/DD/YYYY`
    pub date: String,
    /// `YYYYMMDD`
    pub sort: u64,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl WideSeriesRow {
    pub fn get(&self, series: &str) -> Option<f64> {
        self.values.get(series).copied()
    }
}

/// Merge per-date groups into one row per date, sorted chronologically.
///
/// Each requested series gets the mean of its observations on that date.
/// Dates are kept even when none of the requested series has data, and
/// dates without a sort key are dropped.
pub fn assemble_wide_series<S: AsRef<str>>(
    buckets: &DateBuckets,
    series: &[S],
) -> Vec<WideSeriesRow> {
    let mut rows: Vec<WideSeriesRow> = buckets
        .iter()
        .filter_map(|(date, groups)| {
            let sort = date.sort_key()?;
            let values = series
                .iter()
                .filter_map(|name| {
                    let name = name.as_ref();
                    let observations = groups.get(&normalize_key(name))?;
                    Some((name.to_string(), mean(observations)?))
                })
                .collect();
            Some(WideSeriesRow {
                date: date.to_string(),
                sort,
                values,
            })
        })
        .collect();
    rows.sort_by_key(|row| row.sort);
    log::debug!(
        "[WQD] series: {} rows for {} series from {} dates",
        rows.len(),
        series.len(),
        buckets.len()
    );
    rows
}

/// Mean value for one calendar day of a single-series export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    /// `MM/DD/YYYY`
    pub date: String,
    /// UTC midnight of `date` in milliseconds since the Unix epoch
    pub date_ms: i64,
    /// `YYYYMMDD`
    pub sort: u64,
    pub value: f64,
}

/// Average every row of a single-series export per normalized date.
///
/// Rows with no usable date or value are dropped, as are dates that do not
/// name a real calendar day.
pub fn daily_means(rows: &[RawRecord], columns: &Columns) -> Vec<DailyPoint> {
    let mut days: Vec<(NormalizedDate, Vec<f64>)> = Vec::new();
    let mut index: HashMap<NormalizedDate, usize> = HashMap::new();
    for row in rows {
        let Some(date) = row.text(&columns.date).and_then(|d| normalize_date(&d)) else {
            continue;
        };
        let Some(value) = row.number(&columns.value) else {
            continue;
        };
        match index.get(&date) {
            Some(&i) => days[i].1.push(value),
            None => {
                index.insert(date.clone(), days.len());
                days.push((date, vec![value]));
            }
        }
    }

    let mut points: Vec<DailyPoint> = days
        .into_iter()
        .filter_map(|(date, values)| {
            Some(DailyPoint {
                sort: date.sort_key()?,
                date_ms: date.epoch_millis()?,
                value: mean(&values)?,
                date: date.to_string(),
            })
        })
        .collect();
    points.sort_by_key(|p| p.sort);
    log::debug!(
        "[WQD] series: {} daily points from {} rows",
        points.len(),
        rows.len()
    );
    points
}

/// Map a time window onto inclusive indices into `points`.
///
/// Each bound resolves to the first point at or after it. A start past the
/// last point falls back to the first index and an end past the last point
/// falls back to the last index. Bounds given in reverse are swapped.
/// `None` when there are no points.
pub fn window_indices(points: &[DailyPoint], start_ms: i64, end_ms: i64) -> Option<(usize, usize)> {
    let last = points.len().checked_sub(1)?;
    let (lo, hi) = if start_ms <= end_ms {
        (start_ms, end_ms)
    } else {
        (end_ms, start_ms)
    };
    let start = points.iter().position(|p| p.date_ms >= lo).unwrap_or(0);
    let end = points.iter().position(|p| p.date_ms >= hi).unwrap_or(last);
    Some((start, end))
}
