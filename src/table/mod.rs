// src/table/mod.rs
pub mod convert;
pub mod load;
pub mod utils;

use serde::{Deserialize, Serialize};

pub use load::load_records;

/// Header of the observation date column.
pub const DATE_COLUMN: &str = "Date";
/// Header of the grouping column (one country per group).
pub const CATEGORY_COLUMN: &str = "Country";

/// Cumulative count columns carried by the aggregated table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    Confirmed,
    Recovered,
    Deaths,
}

impl Metric {
    /// Plotting order of the main panel.
    pub const ALL: [Metric; 3] = [Metric::Confirmed, Metric::Recovered, Metric::Deaths];

    /// Column header, also used as the trace name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Confirmed => "Confirmed",
            Metric::Recovered => "Recovered",
            Metric::Deaths => "Deaths",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
