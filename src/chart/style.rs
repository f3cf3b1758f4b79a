use crate::table::Metric;
use anyhow::{bail, Result};
use plotly::common::MarkerSymbol;
use serde::{Deserialize, Serialize};

/// Marker look of one metric, shared by its count and percent-change traces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricStyle {
    pub color: String,
    /// plotly.js symbol name, e.g. `triangle-up`.
    pub symbol: String,
    pub size: usize,
}

impl MetricStyle {
    fn new(color: &str, symbol: &str, size: usize) -> Self {
        Self {
            color: color.to_string(),
            symbol: symbol.to_string(),
            size,
        }
    }

    pub fn marker_symbol(&self) -> Result<MarkerSymbol> {
        let symbol = match self.symbol.trim() {
            "circle" => MarkerSymbol::Circle,
            "square" => MarkerSymbol::Square,
            "diamond" => MarkerSymbol::Diamond,
            "cross" => MarkerSymbol::Cross,
            "x" => MarkerSymbol::X,
            "triangle-up" => MarkerSymbol::TriangleUp,
            "triangle-down" => MarkerSymbol::TriangleDown,
            other => bail!("unsupported marker symbol {:?}", other),
        };
        Ok(symbol)
    }
}

/// Colour, marker symbol and marker size per metric.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleMap {
    pub confirmed: MetricStyle,
    pub recovered: MetricStyle,
    pub deaths: MetricStyle,
}

impl Default for StyleMap {
    fn default() -> Self {
        Self {
            confirmed: MetricStyle::new("navy", "circle", 5),
            recovered: MetricStyle::new("Gray", "triangle-up", 8),
            deaths: MetricStyle::new("red", "triangle-down", 8),
        }
    }
}

impl StyleMap {
    pub fn get(&self, metric: Metric) -> &MetricStyle {
        match metric {
            Metric::Confirmed => &self.confirmed,
            Metric::Recovered => &self.recovered,
            Metric::Deaths => &self.deaths,
        }
    }
}
