// src/table/load.rs
use crate::table::convert::convert_to_record_table;
use crate::table::utils::split_header;
use crate::table::{Metric, CATEGORY_COLUMN, DATE_COLUMN};
use anyhow::{anyhow, bail, Context, Result};
use arrow::{
    compute::concat_batches,
    csv::ReaderBuilder,
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::{fs, io::Cursor, path::Path, sync::Arc};
use tracing::debug;

/// Load the aggregated case table from `path`.
///
/// Column names come from the header row; every cell is read as text and
/// then converted, so extra columns and any column order are accepted.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<RecordBatch> {
    let data = fs::read(&path)
        .with_context(|| format!("Failed to read input table {:?}", path.as_ref()))?;
    read_records(&data)
}

/// Parse an in-memory CSV blob into the typed record table.
pub fn read_records(data: &[u8]) -> Result<RecordBatch> {
    let text = std::str::from_utf8(data).context("input table is not valid UTF-8")?;
    let header_line = text
        .lines()
        .next()
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| anyhow!("input table has no header row"))?;
    let headers = split_header(header_line);

    let required = [DATE_COLUMN, CATEGORY_COLUMN]
        .into_iter()
        .chain(Metric::ALL.iter().map(|m| m.as_str()));
    for name in required {
        if !headers.iter().any(|h| h == name) {
            bail!("input table is missing required column {:?}", name);
        }
    }

    let string_fields: Vec<Field> = headers
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    let string_schema = Arc::new(Schema::new(string_fields));

    let csv_reader = ReaderBuilder::new(string_schema.clone())
        .with_header(true)
        .with_batch_size(8_192)
        .build(Cursor::new(data))
        .context("Failed to create Arrow CSV reader")?;
    let batches = csv_reader
        .collect::<Result<Vec<_>, _>>()
        .context("CSV parse error in input table")?;
    let raw = concat_batches(&string_schema, &batches).context("concatenating CSV batches")?;

    let table = convert_to_record_table(&raw)?;
    debug!(rows = table.num_rows(), columns = headers.len(), "loaded record table");
    Ok(table)
}
