use crate::columns::Columns;
use crate::record::RawRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A monitoring station as shown on the map.
///
/// Parallel to the measurement rows, one `Site` is kept per numeric
/// station identifier: the first row seen for that identifier wins.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Site {
    /// Numeric station identifier
    pub station_id: i64,
    /// Display name
    pub name: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
    /// Well depth qualifier, `Unknown` when `NULL`, empty when blank
    pub depth_qual: String,
    /// Sampling organization
    pub organization: String,
}

/// Read the numeric station identifier of a row. Non-integral or
/// non-numeric identifiers yield `None`.
pub fn station_id(record: &RawRecord, columns: &Columns) -> Option<i64> {
    record
        .number(&columns.station_id)
        .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
        .map(|n| n as i64)
}

fn depth_qualifier(raw: Option<String>) -> String {
    let trimmed = raw.unwrap_or_default().trim().to_string();
    if trimmed == "NULL" {
        "Unknown".to_string()
    } else {
        trimmed
    }
}

/// Deduplicated station registry in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteRegistry {
    sites: Vec<Site>,
    index: HashMap<i64, usize>,
}

impl SiteRegistry {
    /// Build the registry from measurement rows.
    ///
    /// Rows with a blank name, a non-finite coordinate or no usable station
    /// identifier are skipped. Later rows for an already-registered
    /// identifier are ignored even if their name or coordinates differ.
    pub fn build(rows: &[RawRecord], columns: &Columns) -> Self {
        let mut registry = SiteRegistry::default();
        let mut skipped = 0u32;
        for row in rows {
            let name = row
                .text(&columns.site)
                .map(|s| s.trim().to_string())
                .unwrap_or_default();
            let lat = row.number(&columns.latitude);
            let lng = row.number(&columns.longitude);
            let id = station_id(row, columns);
            let (Some(lat), Some(lng), Some(id)) = (lat, lng, id) else {
                skipped += 1;
                continue;
            };
            if name.is_empty() {
                skipped += 1;
                continue;
            }
            if registry.index.contains_key(&id) {
                continue;
            }
            registry.index.insert(id, registry.sites.len());
            registry.sites.push(Site {
                station_id: id,
                name,
                lat,
                lng,
                depth_qual: depth_qualifier(row.text(&columns.depth_qual)),
                organization: row
                    .text(&columns.organization)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default(),
            });
        }
        log::debug!(
            "[WQD] site: {} sites from {} rows, skipped {} without name or coordinates",
            registry.sites.len(),
            rows.len(),
            skipped
        );
        registry
    }

    pub fn get(&self, station_id: i64) -> Option<&Site> {
        self.index.get(&station_id).map(|&i| &self.sites[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Registered sites whose identifier is in `selection`, in registry order.
    pub fn selected(&self, selection: &[i64]) -> Vec<&Site> {
        self.sites
            .iter()
            .filter(|s| selection.contains(&s.station_id))
            .collect()
    }

    pub fn into_sites(self) -> Vec<Site> {
        self.sites
    }
}

/// Add `station_id` to a multi-selection, or remove it if already selected.
pub fn toggle_selection(selection: &mut Vec<i64>, station_id: i64) {
    if let Some(pos) = selection.iter().position(|&id| id == station_id) {
        selection.remove(pos);
    } else {
        selection.push(station_id);
    }
}
