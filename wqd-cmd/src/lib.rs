//! Command implementations for WQD CLI.
//!
//! Each subcommand loads one CSV resource, runs a single chart pipeline
//! over it and writes the plot-ready result as JSON.

use clap::{Args, Subcommand};
use wqd_core::Columns;
use wqd_data::scale::ScaleMode;
use wqd_data::stats::DEFAULT_MIN_COUNT;

pub mod charts;
pub mod map;
pub mod output;

/// Where the rows come from and where the JSON goes.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// CSV locator: an http(s) URL or a local file path
    #[arg(short = 'c', long)]
    pub csv: String,

    /// Output path for the JSON result (stdout when omitted)
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Write single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

/// Column-name overrides for exports that do not use the default headers.
#[derive(Args, Debug, Clone, Default)]
pub struct ColumnArgs {
    /// Parameter name column [default: ParamName]
    #[arg(long)]
    pub param_column: Option<String>,
    /// Site name column [default: Name]
    #[arg(long)]
    pub site_column: Option<String>,
    /// Date column [default: Start_Date, or Date for river-level]
    #[arg(long)]
    pub date_column: Option<String>,
    /// Value column [default: Result_Value, or Value for river-level]
    #[arg(long)]
    pub value_column: Option<String>,
    /// Station identifier column [default: Station_ID]
    #[arg(long)]
    pub station_id_column: Option<String>,
    /// Latitude column [default: Lat]
    #[arg(long)]
    pub lat_column: Option<String>,
    /// Longitude column [default: Long]
    #[arg(long)]
    pub long_column: Option<String>,
    /// Depth qualifier column [default: Depth_Qual]
    #[arg(long)]
    pub depth_qual_column: Option<String>,
    /// Sampling organization column [default: Organization_Name]
    #[arg(long)]
    pub organization_column: Option<String>,
}

impl ColumnArgs {
    /// Apply the overrides on top of `base`.
    pub fn resolve(&self, base: Columns) -> Columns {
        let pick = |flag: &Option<String>, default: String| flag.clone().unwrap_or(default);
        Columns {
            param: pick(&self.param_column, base.param),
            site: pick(&self.site_column, base.site),
            date: pick(&self.date_column, base.date),
            value: pick(&self.value_column, base.value),
            station_id: pick(&self.station_id_column, base.station_id),
            latitude: pick(&self.lat_column, base.latitude),
            longitude: pick(&self.long_column, base.longitude),
            depth_qual: pick(&self.depth_qual_column, base.depth_qual),
            organization: pick(&self.organization_column, base.organization),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Box plot of one parameter across all sites
    BoxPlot {
        #[command(flatten)]
        source: SourceArgs,

        /// Parameter to plot, e.g. "Sulfate as SO4 (mg/L)"
        #[arg(short = 'p', long)]
        param: String,

        /// Leave out sites with fewer observations than this
        #[arg(long, default_value_t = DEFAULT_MIN_COUNT)]
        min_count: usize,

        /// Value axis scale: linear or log10
        #[arg(long, default_value_t = ScaleMode::Linear)]
        scale: ScaleMode,
    },

    /// Box plot of several parameters at one site
    SiteProfile {
        #[command(flatten)]
        source: SourceArgs,

        /// Site name
        #[arg(short = 's', long)]
        site: String,

        /// Parameter to include (repeatable)
        #[arg(short = 'p', long = "param", required = true)]
        params: Vec<String>,

        /// Leave out parameters with fewer observations than this
        #[arg(long, default_value_t = 1)]
        min_count: usize,

        /// Value axis scale: linear or log10
        #[arg(long, default_value_t = ScaleMode::Linear)]
        scale: ScaleMode,
    },

    /// Per-date means of one parameter at the selected sites
    TimeSeries {
        #[command(flatten)]
        source: SourceArgs,

        /// Parameter to plot
        #[arg(short = 'p', long)]
        param: String,

        /// Site to include as a series (repeatable)
        #[arg(short = 's', long = "site")]
        sites: Vec<String>,

        /// Line colour override as SITE=#rrggbb (repeatable)
        #[arg(long = "color", value_parser = parse_color)]
        colors: Vec<(String, String)>,
    },

    /// Daily mean gage values with an optional brush window
    RiverLevel {
        #[command(flatten)]
        source: SourceArgs,

        /// Window start in milliseconds since the Unix epoch
        #[arg(long)]
        start_ms: Option<i64>,

        /// Window end in milliseconds since the Unix epoch
        #[arg(long)]
        end_ms: Option<i64>,
    },

    /// Deduplicated monitoring-site registry for the map
    Sites {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Parameters shared by the selected stations
    SiteParams {
        #[command(flatten)]
        source: SourceArgs,

        /// Station to toggle in the selection (repeatable)
        #[arg(long = "station-id")]
        station_ids: Vec<i64>,

        /// Previously selected parameter, kept if still available
        #[arg(long)]
        previous: Option<String>,

        /// Also split this site's parameters by unit
        #[arg(long)]
        site: Option<String>,
    },
}

fn parse_color(raw: &str) -> Result<(String, String), String> {
    let (site, color) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected SITE=COLOR, got '{}'", raw))?;
    if site.trim().is_empty() || color.trim().is_empty() {
        return Err(format!("expected SITE=COLOR, got '{}'", raw));
    }
    Ok((site.trim().to_string(), color.trim().to_string()))
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::BoxPlot {
            source,
            param,
            min_count,
            scale,
        } => charts::run_box_plot(&source, &param, min_count, scale).await,
        Command::SiteProfile {
            source,
            site,
            params,
            min_count,
            scale,
        } => charts::run_site_profile(&source, &site, params, min_count, scale).await,
        Command::TimeSeries {
            source,
            param,
            sites,
            colors,
        } => charts::run_time_series(&source, &param, sites, colors).await,
        Command::RiverLevel {
            source,
            start_ms,
            end_ms,
        } => charts::run_river_level(&source, start_ms, end_ms).await,
        Command::Sites { source } => map::run_sites(&source).await,
        Command::SiteParams {
            source,
            station_ids,
            previous,
            site,
        } => map::run_site_params(&source, &station_ids, previous.as_deref(), site.as_deref()).await,
    }
}
