//! Chart commands: box plots, time series and river level.

use crate::output::{load, render};
use crate::SourceArgs;
use log::info;
use std::collections::BTreeMap;
use wqd_core::Columns;
use wqd_data::pipeline::{
    box_plot_by_parameter, box_plot_by_site, river_level, time_series, BoxPlotFilter,
    RiverLevelFilter, SiteProfileFilter, TimeSeriesFilter,
};
use wqd_data::scale::ScaleMode;

/// Box plot of `param` across every site with at least `min_count` samples.
pub async fn run_box_plot(
    source: &SourceArgs,
    param: &str,
    min_count: usize,
    scale: ScaleMode,
) -> anyhow::Result<()> {
    let columns = source.columns.resolve(Columns::default());
    let filter = BoxPlotFilter {
        param: param.to_string(),
        min_count,
        scale,
    };
    info!("Box plot of {} (n >= {}, {} scale)", param, min_count, scale);
    let state = load(source).await;
    render(&state, &filter, |rows, f| box_plot_by_site(rows, f, &columns), source)
}

/// Box plot of `params` at one site.
pub async fn run_site_profile(
    source: &SourceArgs,
    site: &str,
    params: Vec<String>,
    min_count: usize,
    scale: ScaleMode,
) -> anyhow::Result<()> {
    let columns = source.columns.resolve(Columns::default());
    let filter = SiteProfileFilter {
        min_count,
        scale,
        ..SiteProfileFilter::new(site, params)
    };
    info!("Site profile of {} for {} parameters", site, filter.params.len());
    let state = load(source).await;
    render(&state, &filter, |rows, f| box_plot_by_parameter(rows, f, &columns), source)
}

/// Per-date means of `param` with one series per site.
pub async fn run_time_series(
    source: &SourceArgs,
    param: &str,
    sites: Vec<String>,
    colors: Vec<(String, String)>,
) -> anyhow::Result<()> {
    let columns = source.columns.resolve(Columns::default());
    let filter = TimeSeriesFilter {
        param: param.to_string(),
        sites,
        colors: colors.into_iter().collect::<BTreeMap<_, _>>(),
    };
    info!("Time series of {} for {} sites", param, filter.sites.len());
    let state = load(source).await;
    render(&state, &filter, |rows, f| time_series(rows, f, &columns), source)
}

/// Daily means of a gage export, optionally windowed.
pub async fn run_river_level(
    source: &SourceArgs,
    start_ms: Option<i64>,
    end_ms: Option<i64>,
) -> anyhow::Result<()> {
    let columns = source.columns.resolve(Columns::gage());
    let filter = RiverLevelFilter { start_ms, end_ms };
    let state = load(source).await;
    render(&state, &filter, |rows, f| river_level(rows, f, &columns), source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{run, ColumnArgs, Command};
    use std::io::Write;

    const CSV: &str = "\
ParamName,Name,Start_Date,Result_Value
X,S1,1/5/2021,10
X,S1,1/5/2021,20
X,S2,1/6/2021,\"1,000\"
Y,S1,1/6/2021,3
";

    fn source(csv: &tempfile::NamedTempFile, out: &tempfile::TempDir) -> SourceArgs {
        SourceArgs {
            csv: csv.path().to_string_lossy().to_string(),
            output: Some(out.path().join("out.json").to_string_lossy().to_string()),
            compact: true,
            columns: ColumnArgs::default(),
        }
    }

    fn fixture(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", body).unwrap();
        file
    }

    fn read_output(out: &tempfile::TempDir) -> serde_json::Value {
        let text = std::fs::read_to_string(out.path().join("out.json")).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[tokio::test]
    async fn test_time_series_command() {
        let csv = fixture(CSV);
        let out = tempfile::tempdir().unwrap();
        run(Command::TimeSeries {
            source: source(&csv, &out),
            param: "X".to_string(),
            sites: vec!["S1".to_string(), "S2".to_string()],
            colors: vec![("S2".to_string(), "#000000".to_string())],
        })
        .await
        .unwrap();

        let json = read_output(&out);
        assert_eq!(json["param"], "X");
        assert_eq!(json["series"][1]["color"], "#000000");
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["date"], "01/05/2021");
        assert_eq!(rows[0]["S1"], 15.0);
        assert!(rows[0].get("S2").is_none());
        assert_eq!(rows[1]["S2"], 1000.0);
    }

    #[tokio::test]
    async fn test_box_plot_command() {
        let csv = fixture(CSV);
        let out = tempfile::tempdir().unwrap();
        run(Command::BoxPlot {
            source: source(&csv, &out),
            param: "X".to_string(),
            min_count: 2,
            scale: ScaleMode::Linear,
        })
        .await
        .unwrap();

        let json = read_output(&out);
        assert_eq!(json["label"], "X");
        assert_eq!(json["min_count"], 2);
        let stats = json["stats"].as_array().unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0]["label"], "S1");
        assert_eq!(stats[0]["median"], 15.0);
        assert_eq!(json["domain"]["scale"], "linear");
    }

    #[tokio::test]
    async fn test_river_level_command() {
        let csv = fixture("Date,Value\n1/1/1970,2\n1/1/1970,4\n1/2/1970,5\n");
        let out = tempfile::tempdir().unwrap();
        run(Command::RiverLevel {
            source: source(&csv, &out),
            start_ms: None,
            end_ms: Some(86_400_000),
        })
        .await
        .unwrap();

        let json = read_output(&out);
        assert_eq!(json["points"][0]["value"], 3.0);
        assert_eq!(json["window"]["start"], 0);
        assert_eq!(json["window"]["end"], 1);
    }

    #[tokio::test]
    async fn test_missing_csv_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = SourceArgs {
            csv: dir.path().join("missing.csv").to_string_lossy().to_string(),
            output: None,
            compact: true,
            columns: ColumnArgs::default(),
        };
        let err = run_box_plot(&source, "X", 1, ScaleMode::Linear)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to load CSV"));
    }
}
