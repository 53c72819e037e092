//! Map page commands: the site registry and per-station parameter lists.

use crate::output::{load, render};
use crate::SourceArgs;
use log::info;
use serde::Serialize;
use wqd_core::site::{toggle_selection, Site, SiteRegistry};
use wqd_core::{Columns, RawRecord};
use wqd_data::catalog::{
    keep_or_first, partition_by_unit, site_parameters, ParameterIndex, UnitPartition,
};

#[derive(Debug, Serialize)]
pub struct SitesReport {
    pub sites: Vec<Site>,
}

/// Parameter choices for the current station selection.
#[derive(Debug, Serialize)]
pub struct SiteParamsReport {
    pub sites: Vec<Site>,
    pub available: Vec<String>,
    pub selected: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub units: Option<UnitPartition>,
}

#[derive(Debug, Clone, PartialEq)]
struct SiteParamsFilter {
    selection: Vec<i64>,
    previous: Option<String>,
    site: Option<String>,
}

pub async fn run_sites(source: &SourceArgs) -> anyhow::Result<()> {
    let columns = source.columns.resolve(Columns::default());
    let state = load(source).await;
    render(
        &state,
        &(),
        |rows, _| SitesReport {
            sites: SiteRegistry::build(rows, &columns).into_sites(),
        },
        source,
    )
}

/// Toggle each id into the selection in order, then report what the
/// selected stations have in common.
pub async fn run_site_params(
    source: &SourceArgs,
    station_ids: &[i64],
    previous: Option<&str>,
    site: Option<&str>,
) -> anyhow::Result<()> {
    let columns = source.columns.resolve(Columns::default());
    let mut selection = Vec::new();
    for id in station_ids {
        toggle_selection(&mut selection, *id);
    }
    info!("Parameters for {} selected stations", selection.len());
    let filter = SiteParamsFilter {
        selection,
        previous: previous.map(str::to_string),
        site: site.map(str::to_string),
    };
    let state = load(source).await;
    render(&state, &filter, |rows, f| site_params(rows, f, &columns), source)
}

fn site_params(rows: &[RawRecord], filter: &SiteParamsFilter, columns: &Columns) -> SiteParamsReport {
    let registry = SiteRegistry::build(rows, columns);
    let index = ParameterIndex::build(rows, columns);
    let available = index.available_for_selection(&registry, &filter.selection);
    SiteParamsReport {
        sites: registry
            .selected(&filter.selection)
            .into_iter()
            .cloned()
            .collect(),
        selected: keep_or_first(filter.previous.as_deref(), &available),
        available,
        units: filter
            .site
            .as_deref()
            .map(|site| partition_by_unit(&site_parameters(rows, site, columns))),
    }
}
