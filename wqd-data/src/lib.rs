//! Data processing for water-quality charts.
//!
//! This crate turns decoded rows into the plot-ready structures each chart
//! consumes. Every function is a pure derivation: rows in, new value out,
//! nothing mutated and nothing cached globally.
//!
//! - `group`: filter rows by parameter/site and group numeric observations
//! - `stats`: quantiles, means and box-plot summaries
//! - `series`: date-aligned wide tables and single-series daily means
//! - `scale`: value-axis domains for linear and log10 axes
//! - `style`: legend colour assignment
//! - `catalog`: which parameters exist for which stations
//! - `pipeline`: the per-chart compositions of the above
//! - `view`: memoised recomputation keyed on rows identity and filters

pub mod catalog;
pub mod group;
pub mod pipeline;
pub mod scale;
pub mod series;
pub mod stats;
pub mod style;
pub mod view;
