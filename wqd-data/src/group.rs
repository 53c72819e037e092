//! Filter & group engine.
//!
//! A row contributes an observation when its parameter matches the query,
//! its site passes the optional site filter, its value coerces to a finite
//! number and its group key is not blank. Anything else is dropped silently.
//! Parameter and site names are compared after whitespace normalization.

use std::collections::HashMap;
use wqd_core::{Columns, RawRecord};
use wqd_utils::dates::{normalize_date, NormalizedDate};
use wqd_utils::text::normalize_key;

/// Which column becomes the group key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// One group per site, for a box plot across sites.
    Site,
    /// One group per parameter, for a box plot across parameters at a site.
    Parameter,
}

/// What to keep and how to key it.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupQuery {
    params: Vec<String>,
    sites: Option<Vec<String>>,
    group_by: GroupBy,
}

impl GroupQuery {
    /// All sites measuring `param`, grouped by site.
    pub fn by_site(param: &str) -> Self {
        Self {
            params: normalized_set([param]),
            sites: None,
            group_by: GroupBy::Site,
        }
    }

    /// The given parameters at one site, grouped by parameter.
    pub fn by_parameter<S: AsRef<str>>(site: &str, params: &[S]) -> Self {
        Self {
            params: normalized_set(params.iter().map(AsRef::as_ref)),
            sites: Some(normalized_set([site])),
            group_by: GroupBy::Parameter,
        }
    }

    /// Restrict to rows whose site is one of `sites`.
    pub fn with_sites<S: AsRef<str>>(mut self, sites: &[S]) -> Self {
        self.sites = Some(normalized_set(sites.iter().map(AsRef::as_ref)));
        self
    }

    /// The group key and value a row contributes, if it qualifies.
    fn observe(&self, row: &RawRecord, columns: &Columns) -> Option<(String, f64)> {
        let param = normalize_key(&row.text(&columns.param)?);
        if param.is_empty() || !self.params.contains(&param) {
            return None;
        }
        let site = normalize_key(&row.text(&columns.site).unwrap_or_default());
        if let Some(allowed) = &self.sites {
            if !allowed.contains(&site) {
                return None;
            }
        }
        let value = row.number(&columns.value)?;
        let key = match self.group_by {
            GroupBy::Site => site,
            GroupBy::Parameter => param,
        };
        if key.is_empty() {
            return None;
        }
        Some((key, value))
    }
}

fn normalized_set<'a, I: IntoIterator<Item = &'a str>>(items: I) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let key = normalize_key(item);
        if !key.is_empty() && !out.contains(&key) {
            out.push(key);
        }
    }
    out
}

/// Observations keyed by group, in first-seen group order. Values keep
/// input row order within each group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Groups {
    entries: Vec<(String, Vec<f64>)>,
    index: HashMap<String, usize>,
}

impl Groups {
    pub fn push(&mut self, key: String, value: f64) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1.push(value),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![value]));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.index.get(key).map(|&i| self.entries[i].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Group qualifying observations by the query's key.
pub fn group_observations(rows: &[RawRecord], query: &GroupQuery, columns: &Columns) -> Groups {
    let mut groups = Groups::default();
    let mut kept = 0usize;
    for row in rows {
        if let Some((key, value)) = query.observe(row, columns) {
            groups.push(key, value);
            kept += 1;
        }
    }
    log::debug!(
        "[WQD] group: {} groups by {:?} from {} of {} rows",
        groups.len(),
        query.group_by,
        kept,
        rows.len()
    );
    groups
}

/// Observations keyed first by normalized date, then by group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateBuckets {
    dates: Vec<(NormalizedDate, Groups)>,
    index: HashMap<NormalizedDate, usize>,
}

impl DateBuckets {
    pub fn push(&mut self, date: NormalizedDate, key: String, value: f64) {
        let i = match self.index.get(&date) {
            Some(&i) => i,
            None => {
                self.index.insert(date.clone(), self.dates.len());
                self.dates.push((date, Groups::default()));
                self.dates.len() - 1
            }
        };
        self.dates[i].1.push(key, value);
    }

    pub fn get(&self, date: &NormalizedDate) -> Option<&Groups> {
        self.index.get(date).map(|&i| &self.dates[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NormalizedDate, &Groups)> {
        self.dates.iter().map(|(d, g)| (d, g))
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Two-level grouping for time series: date, then the query's key.
///
/// Rows whose date column does not normalize are dropped along with the
/// rows the query itself rejects.
pub fn bucket_by_date(rows: &[RawRecord], query: &GroupQuery, columns: &Columns) -> DateBuckets {
    let mut buckets = DateBuckets::default();
    for row in rows {
        let Some(date) = row.text(&columns.date).and_then(|d| normalize_date(&d)) else {
            continue;
        };
        if let Some((key, value)) = query.observe(row, columns) {
            buckets.push(date, key, value);
        }
    }
    log::debug!(
        "[WQD] group: {} dates from {} rows",
        buckets.len(),
        rows.len()
    );
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use wqd_core::decode::decode_str;

    const CSV: &str = "\
ParamName,Name,Start_Date,Result_Value
Sulfate as SO4 (mg/l),Well A,1/5/2021,10
Sulfate  as SO4 (mg/l) ,Well B,1/5/2021,20
Sulfate as SO4 (mg/l),Well A,1/6/2021,\"1,200\"
Sulfate as SO4 (mg/l),Well A,1/7/2021,
Sulfate as SO4 (mg/l),,1/7/2021,5
Chloride (mg/l),Well A,1/5/2021,30
Sulfate as SO4 (mg/l),  Well   B ,1/8/2021,abc
Sulfate as SO4 (mg/l),Well B,not a date,40
";

    fn rows() -> Vec<RawRecord> {
        decode_str(CSV).unwrap()
    }

    #[test]
    fn group_by_site_filters_parameter() {
        let groups = group_observations(
            &rows(),
            &GroupQuery::by_site("Sulfate as SO4 (mg/l)"),
            &Columns::default(),
        );
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get("Well A"), Some(&[10.0, 1200.0][..]));
        assert_eq!(groups.get("Well B"), Some(&[20.0, 40.0][..]));
    }

    #[test]
    fn group_by_site_keeps_first_seen_order() {
        let groups = group_observations(
            &rows(),
            &GroupQuery::by_site("Sulfate as SO4 (mg/l)"),
            &Columns::default(),
        );
        let keys: Vec<&str> = groups.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Well A", "Well B"]);
    }

    #[test]
    fn empty_value_is_excluded_everywhere() {
        let groups = group_observations(
            &rows(),
            &GroupQuery::by_site("Sulfate as SO4 (mg/l)"),
            &Columns::default(),
        );
        let total: usize = groups.iter().map(|(_, v)| v.len()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn target_parameter_is_whitespace_normalized() {
        let groups = group_observations(
            &rows(),
            &GroupQuery::by_site("  Sulfate as   SO4 (mg/l)"),
            &Columns::default(),
        );
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn group_by_parameter_for_one_site() {
        let query = GroupQuery::by_parameter(
            "Well A",
            &["Sulfate as SO4 (mg/l)", "Chloride (mg/l)", "Nitrate (mg/l)"],
        );
        let groups = group_observations(&rows(), &query, &Columns::default());
        assert_eq!(groups.get("Sulfate as SO4 (mg/l)"), Some(&[10.0, 1200.0][..]));
        assert_eq!(groups.get("Chloride (mg/l)"), Some(&[30.0][..]));
        assert!(groups.get("Nitrate (mg/l)").is_none());
    }

    #[test]
    fn site_filter_restricts_groups() {
        let query = GroupQuery::by_site("Sulfate as SO4 (mg/l)").with_sites(&["Well B"]);
        let groups = group_observations(&rows(), &query, &Columns::default());
        assert_eq!(groups.len(), 1);
        assert!(groups.get("Well A").is_none());
    }

    #[test]
    fn empty_parameter_list_yields_nothing() {
        let empty: [&str; 0] = [];
        let query = GroupQuery::by_parameter("Well A", &empty);
        assert!(group_observations(&rows(), &query, &Columns::default()).is_empty());
    }

    #[test]
    fn bucket_by_date_groups_two_levels() {
        let query = GroupQuery::by_site("Sulfate as SO4 (mg/l)").with_sites(&["Well A", "Well B"]);
        let buckets = bucket_by_date(&rows(), &query, &Columns::default());
        assert_eq!(buckets.len(), 2);
        let jan5 = normalize_date("1/5/2021").unwrap();
        let day = buckets.get(&jan5).unwrap();
        assert_eq!(day.get("Well A"), Some(&[10.0][..]));
        assert_eq!(day.get("Well B"), Some(&[20.0][..]));
    }
}
