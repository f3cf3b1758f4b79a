// src/config.rs
use crate::chart::{ChartLayout, StyleMap};
use crate::series::{date_parser::DEFAULT_DATE_FORMAT, DuplicateDates};
use crate::table::Metric;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Optional settings file read from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "report.yaml";

/// First date of the stock report.
pub const DEFAULT_CUTOFF: NaiveDate = match NaiveDate::from_ymd_opt(2020, 3, 1) {
    Some(date) => date,
    None => panic!("invalid default cutoff"),
};

/// Everything one report run needs. The defaults reproduce the stock
/// report: Chile from 2020-03-01, read from `./data`, written to `./results`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Aggregated per-country CSV.
    pub input: PathBuf,
    /// Must exist unless `create_results_dir` is set.
    pub results_dir: PathBuf,
    pub country: String,
    /// First date kept (inclusive).
    pub cutoff: NaiveDate,
    pub date_format: String,
    pub duplicate_dates: DuplicateDates,
    pub create_results_dir: bool,
    /// Open the written report in the default viewer.
    pub open_viewer: bool,
    pub chart: ChartLayout,
    pub styles: StyleMap,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("./data/countries-aggregated.csv"),
            results_dir: PathBuf::from("./results"),
            country: "Chile".to_string(),
            cutoff: DEFAULT_CUTOFF,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            duplicate_dates: DuplicateDates::default(),
            create_results_dir: false,
            open_viewer: true,
            chart: ChartLayout::default(),
            styles: StyleMap::default(),
        }
    }
}

impl ReportConfig {
    /// Read `path` as YAML if it exists, otherwise use the defaults.
    /// Keys left out of the file keep their default value.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let cfg = if path.is_file() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let cfg: ReportConfig = serde_yaml::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?;
            info!(path = %path.display(), "loaded config");
            cfg
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            ReportConfig::default()
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.country.trim().is_empty() {
            bail!("country must not be empty");
        }
        if self.chart.row_heights.len() != 3 {
            bail!(
                "chart.row_heights needs 3 values, got {:?}",
                self.chart.row_heights
            );
        }
        if self
            .chart
            .row_heights
            .iter()
            .any(|h| !h.is_finite() || *h <= 0.0)
        {
            bail!(
                "chart.row_heights must be positive, got {:?}",
                self.chart.row_heights
            );
        }
        if !(0.0..0.5).contains(&self.chart.vertical_spacing) {
            bail!(
                "chart.vertical_spacing must be in [0, 0.5), got {}",
                self.chart.vertical_spacing
            );
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            bail!("chart width and height must be non-zero");
        }
        for metric in Metric::ALL {
            self.styles
                .get(metric)
                .marker_symbol()
                .with_context(|| format!("styles.{}", metric.as_str().to_lowercase()))?;
        }
        Ok(())
    }
}
