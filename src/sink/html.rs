// src/sink/html.rs
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use plotly::Plot;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// `<category>_<YYYY-MM-DD>.html`, or `<category>_empty.html` without data.
pub fn report_file_name(category: &str, last_date: Option<NaiveDate>) -> String {
    match last_date {
        Some(date) => format!("{}_{}.html", category, date.format("%Y-%m-%d")),
        None => format!("{}_empty.html", category),
    }
}

/// Write the report page to `results_dir/file_name` and return its path.
///
/// The page carries the plotly.js bundle inline, so it opens without network
/// access. It goes to a temporary file first and is renamed into place, so a
/// failed run leaves no partial report. A missing `results_dir` is an error
/// unless `create_dir` is set. No viewer is opened.
#[tracing::instrument(level = "info", skip(plot), fields(dir = %results_dir.display()))]
pub fn write_report(
    plot: &Plot,
    results_dir: &Path,
    file_name: &str,
    create_dir: bool,
) -> Result<PathBuf> {
    if !results_dir.is_dir() {
        if !create_dir {
            bail!("results directory {} does not exist", results_dir.display());
        }
        fs::create_dir_all(results_dir)
            .with_context(|| format!("creating results directory {}", results_dir.display()))?;
        info!("created results directory");
    }

    let html = plot.to_html();

    let final_path = results_dir.join(file_name);
    let tmp_path = results_dir.join(format!("{}.tmp", file_name));
    fs::write(&tmp_path, html.as_bytes())
        .with_context(|| format!("writing {}", tmp_path.display()))?;
    fs::rename(&tmp_path, &final_path).with_context(|| {
        format!("moving {} to {}", tmp_path.display(), final_path.display())
    })?;

    info!(path = %final_path.display(), bytes = html.len(), "wrote report");
    Ok(final_path)
}
