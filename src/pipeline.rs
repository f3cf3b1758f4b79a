// src/pipeline.rs
use crate::chart::render_report;
use crate::config::ReportConfig;
use crate::series::{filter_category, index_by_date, CountrySeries};
use crate::sink::{report_file_name, write_report};
use crate::table::{load_records, CATEGORY_COLUMN};
use crate::transform::{derive_changes, CHANGE_METRICS};
use anyhow::Result;
use plotly::Plot;
use std::path::PathBuf;
use tracing::info;

/// Result of one report run.
pub struct ReportOutcome {
    /// Written HTML document.
    pub path: PathBuf,
    pub series: CountrySeries,
    pub figure: Plot,
}

/// Load, filter, reindex, transform and render, without touching the
/// results directory.
#[tracing::instrument(level = "info", skip(cfg), fields(country = %cfg.country, input = %cfg.input.display()))]
pub fn prepare(cfg: &ReportConfig) -> Result<(CountrySeries, Plot)> {
    let table = load_records(&cfg.input)?;
    info!(rows = table.num_rows(), "loaded input table");

    let rows = filter_category(&table, CATEGORY_COLUMN, &cfg.country)?;
    let series = index_by_date(
        &rows,
        &cfg.country,
        cfg.cutoff,
        &cfg.date_format,
        cfg.duplicate_dates,
    )?;
    info!(points = series.len(), last = ?series.last_date(), "series ready");

    let changes = derive_changes(&series, &CHANGE_METRICS);
    let figure = render_report(&series, &changes, &cfg.styles, &cfg.chart)?;
    Ok((series, figure))
}

/// Full run up to and including the written report. Displaying it is left
/// to the caller (see [`crate::sink::present`]).
pub fn run(cfg: &ReportConfig) -> Result<ReportOutcome> {
    let (series, figure) = prepare(cfg)?;
    let file_name = report_file_name(&series.category, series.last_date());
    let path = write_report(
        &figure,
        &cfg.results_dir,
        &file_name,
        cfg.create_results_dir,
    )?;
    Ok(ReportOutcome {
        path,
        series,
        figure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const SAMPLE: &str = "Date,Country,Confirmed,Recovered,Deaths
2020-02-28,Chile,1,0,0
2020-03-01,Chile,5,0,0
2020-03-01,Peru,2,0,0
2020-03-02,Chile,10,1,0
";

    fn workspace(root: &Path, csv: &str) -> Result<ReportConfig> {
        let data = root.join("data");
        let results = root.join("results");
        fs::create_dir_all(&data)?;
        fs::create_dir_all(&results)?;
        let input = data.join("countries-aggregated.csv");
        fs::write(&input, csv)?;
        Ok(ReportConfig {
            input,
            results_dir: results,
            open_viewer: false,
            ..ReportConfig::default()
        })
    }

    #[test]
    fn test_run_writes_dated_report() -> Result<()> {
        crate::init_test_logging();
        let dir = tempdir()?;
        let cfg = workspace(dir.path(), SAMPLE)?;

        let outcome = run(&cfg)?;
        assert_eq!(outcome.path, cfg.results_dir.join("Chile_2020-03-02.html"));
        assert!(outcome.path.is_file());

        let d = |day| NaiveDate::from_ymd_opt(2020, 3, day).unwrap();
        assert_eq!(outcome.series.dates, vec![d(1), d(2)]);
        assert_eq!(outcome.series.confirmed, vec![5.0, 10.0]);

        let figure: Value = serde_json::from_str(&outcome.figure.to_json())?;
        let pct = figure["data"]
            .as_array()
            .and_then(|data| data.iter().find(|t| t["name"] == "%change Confirmed"))
            .unwrap();
        assert_eq!(pct["y"], json!([null, 100.0]));
        Ok(())
    }

    #[test]
    fn report_opens_without_network() -> Result<()> {
        let dir = tempdir()?;
        let cfg = workspace(dir.path(), SAMPLE)?;
        let outcome = run(&cfg)?;
        let html = fs::read_to_string(&outcome.path)?;
        assert!(!html.contains("<script src="));
        assert!(html.contains("Plotly.newPlot"));
        Ok(())
    }

    #[test]
    fn rerun_gives_identical_figure() -> Result<()> {
        let dir = tempdir()?;
        let cfg = workspace(dir.path(), SAMPLE)?;
        let first = run(&cfg)?;
        let second = run(&cfg)?;
        assert_eq!(first.path, second.path);
        assert_eq!(first.figure.to_json(), second.figure.to_json());
        Ok(())
    }

    #[test]
    fn absent_country_still_writes_a_report() -> Result<()> {
        let dir = tempdir()?;
        let cfg = ReportConfig {
            country: "Narnia".into(),
            ..workspace(dir.path(), SAMPLE)?
        };
        let outcome = run(&cfg)?;
        assert!(outcome.series.is_empty());
        assert_eq!(outcome.path, cfg.results_dir.join("Narnia_empty.html"));
        assert!(outcome.path.is_file());
        Ok(())
    }

    #[test]
    fn missing_results_dir_writes_nothing() -> Result<()> {
        let dir = tempdir()?;
        let cfg = workspace(dir.path(), SAMPLE)?;
        fs::remove_dir(&cfg.results_dir)?;
        assert!(run(&cfg).is_err());
        assert!(!cfg.results_dir.exists());
        Ok(())
    }

    #[test]
    fn missing_input_is_fatal() -> Result<()> {
        let dir = tempdir()?;
        let cfg = ReportConfig {
            input: dir.path().join("nope.csv"),
            results_dir: dir.path().to_path_buf(),
            ..ReportConfig::default()
        };
        assert!(prepare(&cfg).is_err());
        Ok(())
    }
}
