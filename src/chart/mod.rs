// src/chart/mod.rs
pub mod render;
pub mod style;
pub mod theme;

use serde::{Deserialize, Serialize};

pub use render::render_report;
pub use style::{MetricStyle, StyleMap};
pub use theme::Theme;

/// Outer margins in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub l: usize,
    pub r: usize,
    pub b: usize,
    pub t: usize,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            l: 10,
            r: 10,
            b: 10,
            t: 50,
        }
    }
}

/// Page-level settings of the report figure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    /// Title is `"<title_prefix> <category>"`.
    pub title_prefix: String,
    pub theme: Theme,
    pub width: usize,
    pub height: usize,
    pub margin: Margins,
    /// Relative panel heights, top to bottom; one per panel.
    pub row_heights: Vec<f64>,
    /// Gap between panels as a fraction of the plot height.
    pub vertical_spacing: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            title_prefix: "COVID19 report".to_string(),
            theme: Theme::default(),
            width: 1000,
            height: 600,
            margin: Margins::default(),
            row_heights: vec![0.7, 0.15, 0.15],
            vertical_spacing: 0.02,
        }
    }
}
