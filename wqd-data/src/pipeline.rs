//! Per-chart compositions of grouping, statistics and assembly.
//!
//! Each chart is a pure function of the decoded rows and its filter. The
//! filters are plain values so a [`crate::view::ChartView`] can compare
//! them to decide whether to recompute.

use crate::group::{bucket_by_date, group_observations, GroupQuery};
use crate::scale::{value_domain, AxisDomain, ScaleMode};
use crate::series::{assemble_wide_series, daily_means, window_indices, DailyPoint, WideSeriesRow};
use crate::stats::{summarize_groups, SummaryStats, DEFAULT_MIN_COUNT};
use crate::style::{assign_colors, SeriesStyle};
use serde::Serialize;
use std::collections::BTreeMap;
use wqd_core::{Columns, RawRecord};

/// Box plot of one parameter across every site measuring it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlotFilter {
    pub param: String,
    pub min_count: usize,
    pub scale: ScaleMode,
}

impl BoxPlotFilter {
    pub fn new(param: &str) -> Self {
        Self {
            param: param.to_string(),
            min_count: DEFAULT_MIN_COUNT,
            scale: ScaleMode::default(),
        }
    }
}

/// Box plot of several parameters at one site.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteProfileFilter {
    pub site: String,
    pub params: Vec<String>,
    pub min_count: usize,
    pub scale: ScaleMode,
}

impl SiteProfileFilter {
    /// No sample-count threshold by default.
    pub fn new(site: &str, params: Vec<String>) -> Self {
        Self {
            site: site.to_string(),
            params,
            min_count: 1,
            scale: ScaleMode::default(),
        }
    }
}

/// Output of either box plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotData {
    /// The parameter (across sites) or the site (across parameters).
    pub label: String,
    pub min_count: usize,
    pub stats: Vec<SummaryStats>,
    /// `None` when no group met the threshold.
    pub domain: Option<AxisDomain>,
}

pub fn box_plot_by_site(rows: &[RawRecord], filter: &BoxPlotFilter, columns: &Columns) -> BoxPlotData {
    let groups = group_observations(rows, &GroupQuery::by_site(&filter.param), columns);
    let stats = summarize_groups(&groups, filter.min_count);
    BoxPlotData {
        label: filter.param.clone(),
        min_count: filter.min_count,
        domain: value_domain(&stats, filter.scale),
        stats,
    }
}

pub fn box_plot_by_parameter(
    rows: &[RawRecord],
    filter: &SiteProfileFilter,
    columns: &Columns,
) -> BoxPlotData {
    let query = GroupQuery::by_parameter(&filter.site, &filter.params);
    let groups = group_observations(rows, &query, columns);
    let stats = summarize_groups(&groups, filter.min_count);
    BoxPlotData {
        label: filter.site.clone(),
        min_count: filter.min_count,
        domain: value_domain(&stats, filter.scale),
        stats,
    }
}

/// One parameter over time at the selected sites.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesFilter {
    pub param: String,
    pub sites: Vec<String>,
    /// Site name to line colour.
    pub colors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesData {
    pub param: String,
    pub series: Vec<SeriesStyle>,
    pub rows: Vec<WideSeriesRow>,
}

pub fn time_series(rows: &[RawRecord], filter: &TimeSeriesFilter, columns: &Columns) -> TimeSeriesData {
    let query = GroupQuery::by_site(&filter.param).with_sites(&filter.sites);
    let buckets = bucket_by_date(rows, &query, columns);
    TimeSeriesData {
        param: filter.param.clone(),
        series: assign_colors(&filter.sites, &filter.colors),
        rows: assemble_wide_series(&buckets, &filter.sites),
    }
}

/// Optional brush window over the river level chart, in epoch milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiverLevelFilter {
    pub start_ms: Option<i64>,
    pub end_ms: Option<i64>,
}

/// Inclusive index range of the brushed points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiverLevelData {
    pub points: Vec<DailyPoint>,
    /// Present when the filter sets at least one bound.
    pub window: Option<Window>,
}

/// Daily means of a gage export plus the brushed window. An open bound
/// extends to the first or last point.
pub fn river_level(rows: &[RawRecord], filter: &RiverLevelFilter, columns: &Columns) -> RiverLevelData {
    let points = daily_means(rows, columns);
    let window = match (filter.start_ms, filter.end_ms) {
        (None, None) => None,
        (start, end) => {
            let first = points.first().map(|p| p.date_ms);
            let last = points.last().map(|p| p.date_ms);
            match (start.or(first), end.or(last)) {
                (Some(start), Some(end)) => window_indices(&points, start, end)
                    .map(|(start, end)| Window { start, end }),
                _ => None,
            }
        }
    };
    RiverLevelData { points, window }
}
