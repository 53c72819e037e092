//! Which parameters were measured where.
//!
//! The map page intersects parameter lists across the selected stations,
//! and the site dialog splits one site's parameters by concentration unit.

use std::collections::HashMap;
use wqd_core::site::{station_id, SiteRegistry};
use wqd_core::{Columns, RawRecord};
use wqd_utils::text::normalize_key;

const MICROGRAMS: &str = "(ug/L)";
const MILLIGRAMS: &str = "(mg/L)";

/// Station id to the distinct parameter names measured there, in
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterIndex {
    by_station: HashMap<i64, Vec<String>>,
}

impl ParameterIndex {
    /// Index every row with a numeric station id and a non-blank parameter.
    pub fn build(rows: &[RawRecord], columns: &Columns) -> Self {
        let mut by_station: HashMap<i64, Vec<String>> = HashMap::new();
        for row in rows {
            let Some(id) = station_id(row, columns) else {
                continue;
            };
            let param = row.text(&columns.param).unwrap_or_default();
            let param = param.trim();
            if param.is_empty() {
                continue;
            }
            let params = by_station.entry(id).or_default();
            if !params.iter().any(|p| p == param) {
                params.push(param.to_string());
            }
        }
        log::debug!("[WQD] catalog: parameters indexed for {} stations", by_station.len());
        Self { by_station }
    }

    /// Parameters measured at one station. Empty for unknown stations.
    pub fn parameters(&self, station_id: i64) -> &[String] {
        self.by_station
            .get(&station_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Parameters measured at every selected station, in the order of the
    /// first selected station.
    pub fn available_parameters(&self, station_ids: &[i64]) -> Vec<String> {
        let Some((first, rest)) = station_ids.split_first() else {
            return Vec::new();
        };
        self.parameters(*first)
            .iter()
            .filter(|param| {
                rest.iter()
                    .all(|id| self.parameters(*id).iter().any(|p| p == *param))
            })
            .cloned()
            .collect()
    }

    /// [`available_parameters`](Self::available_parameters) for a map
    /// selection. Empty when none of the selected ids is a site on the map.
    pub fn available_for_selection(&self, registry: &SiteRegistry, station_ids: &[i64]) -> Vec<String> {
        if registry.selected(station_ids).is_empty() {
            return Vec::new();
        }
        self.available_parameters(station_ids)
    }
}

/// Keep the previous choice if it is still offered, else take the first
/// offered parameter.
pub fn keep_or_first(previous: Option<&str>, available: &[String]) -> Option<String> {
    match previous {
        Some(prev) if available.iter().any(|p| p == prev) => Some(prev.to_string()),
        _ => available.first().cloned(),
    }
}

/// Distinct normalized parameter names measured at the named site.
pub fn site_parameters(rows: &[RawRecord], site: &str, columns: &Columns) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for row in rows {
        if row.text(&columns.site).as_deref() != Some(site) {
            continue;
        }
        let param = normalize_key(&row.text(&columns.param).unwrap_or_default());
        if !param.is_empty() && !out.contains(&param) {
            out.push(param);
        }
    }
    out
}

/// Parameters split by concentration unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct UnitPartition {
    pub ug_per_l: Vec<String>,
    pub mg_per_l: Vec<String>,
}

/// Split parameters into `(ug/L)` and `(mg/L)` lists. Anything else is
/// left out of both.
pub fn partition_by_unit<S: AsRef<str>>(params: &[S]) -> UnitPartition {
    let mut out = UnitPartition::default();
    for param in params {
        let param = param.as_ref();
        if param.contains(MICROGRAMS) {
            out.ug_per_l.push(param.to_string());
        }
        if param.contains(MILLIGRAMS) {
            out.mg_per_l.push(param.to_string());
        }
    }
    out
}
