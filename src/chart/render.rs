// src/chart/render.rs
use crate::chart::{ChartLayout, StyleMap};
use crate::series::CountrySeries;
use crate::table::Metric;
use crate::transform::PercentChange;
use anyhow::{bail, Result};
use plotly::common::{Marker, Mode, Title};
use plotly::layout::{Axis, AxisType, Layout, Margin};
use plotly::{Plot, Scatter};
use tracing::debug;

/// Stack group shared by the percent-change area traces.
const STACK_GROUP: &str = "one";

/// Panels stacked below one another; plotly's layout has one setter per y axis.
const MAX_ROWS: usize = 4;

/// Build the report figure: counts on top, one percent-change area panel per
/// entry of `changes` below, all on one date axis.
///
/// Pure; an empty series gives a figure with empty traces.
pub fn render_report(
    series: &CountrySeries,
    changes: &[PercentChange],
    styles: &StyleMap,
    layout: &ChartLayout,
) -> Result<Plot> {
    let rows = 1 + changes.len();
    if rows > MAX_ROWS {
        bail!("at most {} panels are supported, got {}", MAX_ROWS, rows);
    }
    if layout.row_heights.len() != rows {
        bail!(
            "{} panels need {} row heights, got {:?}",
            rows,
            rows,
            layout.row_heights
        );
    }
    let domains = row_domains(&layout.row_heights, layout.vertical_spacing);
    let x = series.date_labels();
    let mut plot = Plot::new();

    for metric in Metric::ALL {
        let style = styles.get(metric);
        let y: Vec<Option<f64>> = series
            .metric(metric)
            .iter()
            .map(|&v| v.is_finite().then_some(v))
            .collect();
        let trace = Scatter::new(x.clone(), y)
            .name(metric.as_str())
            .mode(Mode::LinesMarkers)
            .marker(
                Marker::new()
                    .color(style.color.clone())
                    .size(style.size)
                    .symbol(style.marker_symbol()?),
            )
            .x_axis("x")
            .y_axis(&axis_ref('y', 1));
        plot.add_trace(trace);
    }

    for (i, change) in changes.iter().enumerate() {
        let style = styles.get(change.metric);
        // non-finite changes serialise as null
        let y: Vec<Option<f64>> = change
            .values
            .iter()
            .map(|v| v.filter(|v| v.is_finite()))
            .collect();
        let trace = Scatter::new(x.clone(), y)
            .name(&change.label())
            .marker(
                Marker::new()
                    .color(style.color.clone())
                    .symbol(style.marker_symbol()?),
            )
            .stack_group(STACK_GROUP)
            .x_axis("x")
            .y_axis(&axis_ref('y', i + 2));
        plot.add_trace(trace);
    }

    let theme = layout.theme;
    let title = format!("{} {}", layout.title_prefix, series.category);
    let mut figure_layout = theme
        .style_layout(Layout::new())
        .title(Title::from(title.as_str()))
        .auto_size(false)
        .width(layout.width)
        .height(layout.height)
        .margin(
            Margin::new()
                .left(layout.margin.l)
                .right(layout.margin.r)
                .bottom(layout.margin.b)
                .top(layout.margin.t),
        )
        // one date axis for every panel, drawn under the bottom one
        .x_axis(
            theme.style_axis(
                Axis::new()
                    .type_(AxisType::Date)
                    .anchor(&axis_ref('y', rows)),
            ),
        );

    for (i, domain) in domains.into_iter().enumerate() {
        let axis = theme.style_axis(Axis::new().domain(&domain).anchor("x"));
        figure_layout = match i + 1 {
            1 => figure_layout.y_axis(axis),
            2 => figure_layout.y_axis2(axis),
            3 => figure_layout.y_axis3(axis),
            4 => figure_layout.y_axis4(axis),
            row => bail!("no y axis for panel {}", row),
        };
    }
    plot.set_layout(figure_layout);

    debug!(
        category = %series.category,
        traces = Metric::ALL.len() + changes.len(),
        points = x.len(),
        "rendered figure"
    );
    Ok(plot)
}

/// Vertical `[bottom, top]` domain of each row, top row first.
///
/// Heights are normalised to the space left after the gaps and laid out from
/// the bottom up, the same arithmetic plotly's `make_subplots` uses.
pub fn row_domains(row_heights: &[f64], spacing: f64) -> Vec<[f64; 2]> {
    let n = row_heights.len();
    if n == 0 {
        return Vec::new();
    }
    let total: f64 = row_heights.iter().sum();
    let available = 1.0 - spacing * (n - 1) as f64;

    let mut domains = Vec::with_capacity(n);
    let mut bottom = 0.0;
    for h in row_heights.iter().rev() {
        let top = (bottom + available * h / total).min(1.0);
        domains.push([bottom, top]);
        bottom = top + spacing;
    }
    domains.reverse();
    domains
}

/// Trace-side axis reference: `y`, `y2`, ...
fn axis_ref(axis: char, row: usize) -> String {
    if row == 1 {
        axis.to_string()
    } else {
        format!("{}{}", axis, row)
    }
}
