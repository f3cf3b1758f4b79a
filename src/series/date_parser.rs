use anyhow::{anyhow, Result};
use chrono::NaiveDate;

/// Default layout of the `Date` column.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Strict parse of a date cell with `format`; surrounding whitespace is ignored.
pub fn parse_date(s: &str, format: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, format)
        .map_err(|e| anyhow!("date {:?} does not match format {:?}: {}", s, format, e))
}
