use plotly::common::Font;
use plotly::layout::{Axis, Layout};
use serde::{Deserialize, Serialize};

/// Named look of the report, applied through layout and axis colours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Grey plot area with white grid lines.
    #[default]
    Ggplot2,
    PlotlyWhite,
    /// plotly.js defaults.
    #[serde(rename = "none")]
    Plain,
}

struct Palette {
    paper: &'static str,
    plot: &'static str,
    grid: &'static str,
    font: &'static str,
}

const GGPLOT2: Palette = Palette {
    paper: "white",
    plot: "rgb(237,237,237)",
    grid: "white",
    font: "rgb(51,51,51)",
};

const PLOTLY_WHITE: Palette = Palette {
    paper: "white",
    plot: "white",
    grid: "#EBF0F8",
    font: "#2a3f5f",
};

impl Theme {
    fn palette(&self) -> Option<&'static Palette> {
        match self {
            Theme::Ggplot2 => Some(&GGPLOT2),
            Theme::PlotlyWhite => Some(&PLOTLY_WHITE),
            Theme::Plain => None,
        }
    }

    pub fn style_layout(&self, layout: Layout) -> Layout {
        match self.palette() {
            Some(p) => layout
                .paper_background_color(p.paper)
                .plot_background_color(p.plot)
                .font(Font::new().color(p.font)),
            None => layout,
        }
    }

    pub fn style_axis(&self, axis: Axis) -> Axis {
        match self.palette() {
            Some(p) => axis.show_grid(true).grid_color(p.grid).zero_line(false),
            None => axis,
        }
    }
}
