// src/series/mod.rs
pub mod date_parser;
pub mod filter;
pub mod reindex;

use crate::table::Metric;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use filter::filter_category;
pub use reindex::index_by_date;

/// What to do when one category carries the same date twice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateDates {
    /// Fail the run, naming the first repeated date.
    #[default]
    Reject,
    /// Keep the row that appears last in the input.
    KeepLast,
}

/// One category's observations keyed by ascending, unique date.
///
/// Missing counts are stored as `NaN`.
#[derive(Clone, Debug, PartialEq)]
pub struct CountrySeries {
    pub category: String,
    pub dates: Vec<NaiveDate>,
    pub confirmed: Vec<f64>,
    pub recovered: Vec<f64>,
    pub deaths: Vec<f64>,
}

impl CountrySeries {
    pub fn empty(category: &str) -> Self {
        Self {
            category: category.to_string(),
            dates: Vec::new(),
            confirmed: Vec::new(),
            recovered: Vec::new(),
            deaths: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Most recent date, `None` for an empty series.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn metric(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Confirmed => &self.confirmed,
            Metric::Recovered => &self.recovered,
            Metric::Deaths => &self.deaths,
        }
    }

    /// Dates rendered as `YYYY-MM-DD`, the form plotly reads as a date axis.
    pub fn date_labels(&self) -> Vec<String> {
        self.dates
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect()
    }
}
