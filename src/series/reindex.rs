// src/series/reindex.rs
use crate::series::{date_parser::parse_date, CountrySeries, DuplicateDates};
use crate::table::{
    convert::{f64_column, string_column},
    Metric, DATE_COLUMN,
};
use anyhow::{anyhow, bail, Context, Result};
use arrow::{
    array::{Array, Float64Array},
    record_batch::RecordBatch,
};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Key one category's rows by date and truncate them at `cutoff`.
///
/// Every date is parsed before truncation, so a malformed date fails the
/// run even when it would have been dropped. Duplicate dates are only
/// looked for among the rows that survive the cutoff.
#[tracing::instrument(level = "info", skip(batch), fields(rows = batch.num_rows()))]
pub fn index_by_date(
    batch: &RecordBatch,
    category: &str,
    cutoff: NaiveDate,
    date_format: &str,
    duplicates: DuplicateDates,
) -> Result<CountrySeries> {
    let date_col = string_column(batch, DATE_COLUMN)?;
    let confirmed = f64_column(batch, Metric::Confirmed.as_str())?;
    let recovered = f64_column(batch, Metric::Recovered.as_str())?;
    let deaths = f64_column(batch, Metric::Deaths.as_str())?;

    // (date, [confirmed, recovered, deaths]) in input order
    let mut rows: Vec<(NaiveDate, [f64; 3])> = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        if date_col.is_null(row) {
            bail!("{} {:?}: missing date at row {}", category, DATE_COLUMN, row);
        }
        let date = parse_date(date_col.value(row), date_format)
            .with_context(|| format!("{}: bad date at row {}", category, row))?;
        rows.push((
            date,
            [
                value_or_nan(confirmed, row),
                value_or_nan(recovered, row),
                value_or_nan(deaths, row),
            ],
        ));
    }

    rows.retain(|(date, _)| *date >= cutoff);
    // stable, so equal dates keep input order for KeepLast
    rows.sort_by_key(|(date, _)| *date);
    let rows = resolve_duplicates(rows, duplicates)
        .with_context(|| format!("indexing {} by date", category))?;

    let mut series = CountrySeries::empty(category);
    for (date, [c, r, d]) in rows {
        series.dates.push(date);
        series.confirmed.push(c);
        series.recovered.push(r);
        series.deaths.push(d);
    }

    debug!(
        category,
        %cutoff,
        kept = series.len(),
        first = ?series.dates.first(),
        last = ?series.last_date(),
        "reindexed by date"
    );
    Ok(series)
}

fn value_or_nan(arr: &Float64Array, row: usize) -> f64 {
    if arr.is_null(row) {
        f64::NAN
    } else {
        arr.value(row)
    }
}

/// Collapse runs of equal dates in an already sorted row list.
fn resolve_duplicates(
    rows: Vec<(NaiveDate, [f64; 3])>,
    policy: DuplicateDates,
) -> Result<Vec<(NaiveDate, [f64; 3])>> {
    let mut out: Vec<(NaiveDate, [f64; 3])> = Vec::with_capacity(rows.len());
    for (date, values) in rows {
        if let Some(prev) = out.last_mut() {
            if prev.0 == date {
                match policy {
                    DuplicateDates::Reject => return Err(anyhow!("duplicate date {}", date)),
                    DuplicateDates::KeepLast => {
                        warn!(%date, "duplicate date, keeping the later row");
                        prev.1 = values;
                        continue;
                    }
                }
            }
        }
        out.push((date, values));
    }
    Ok(out)
}
