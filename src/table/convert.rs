use crate::table::{utils, Metric, CATEGORY_COLUMN, DATE_COLUMN};
use anyhow::{anyhow, Context, Result};
use arrow::{
    array::{Array, ArrayRef, Float64Array, Float64Builder, StringArray},
    datatypes::{DataType, Field, Schema, SchemaRef},
    record_batch::RecordBatch,
};
use std::sync::Arc;

/// Schema of the loaded record table: dates and categories stay text,
/// metric counts become `Float64`.
pub fn record_schema() -> SchemaRef {
    let mut fields = vec![
        Field::new(DATE_COLUMN, DataType::Utf8, true),
        Field::new(CATEGORY_COLUMN, DataType::Utf8, true),
    ];
    for metric in Metric::ALL {
        fields.push(Field::new(metric.as_str(), DataType::Float64, true));
    }
    Arc::new(Schema::new(fields))
}

/// Project the all-`Utf8` batch read from CSV onto [`record_schema`],
/// parsing metric cells as `f64`. Empty cells become nulls.
pub fn convert_to_record_table(batch: &RecordBatch) -> Result<RecordBatch> {
    let mut out: Vec<ArrayRef> = Vec::with_capacity(2 + Metric::ALL.len());

    for name in [DATE_COLUMN, CATEGORY_COLUMN] {
        let sarr = string_column(batch, name)?;
        out.push(Arc::new(sarr.clone()) as ArrayRef);
    }

    for metric in Metric::ALL {
        let sarr = string_column(batch, metric.as_str())?;
        let mut b = Float64Builder::with_capacity(sarr.len());
        for (row, opt) in sarr.iter().enumerate() {
            let cell = opt.map(utils::clean_str).filter(|s| !s.is_empty());
            match cell {
                None => b.append_null(),
                Some(s) => {
                    let v: f64 = s.parse().with_context(|| {
                        format!("column {} at data row {}: {:?} is not numeric", metric, row, s)
                    })?;
                    b.append_value(v);
                }
            }
        }
        out.push(Arc::new(b.finish()) as ArrayRef);
    }

    RecordBatch::try_new(record_schema(), out).map_err(Into::into)
}

/// Borrow a named column as `StringArray`.
pub fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| anyhow!("missing column {:?}", name))?;
    col.as_any().downcast_ref::<StringArray>().ok_or_else(|| {
        anyhow!(
            "column {} was expected to be StringArray, got {:?}",
            name,
            col.data_type()
        )
    })
}

/// Borrow a named column as `Float64Array`.
pub fn f64_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Float64Array> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| anyhow!("missing column {:?}", name))?;
    col.as_any().downcast_ref::<Float64Array>().ok_or_else(|| {
        anyhow!(
            "column {} was expected to be Float64Array, got {:?}",
            name,
            col.data_type()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_batch(rows: &[[&str; 5]]) -> RecordBatch {
        let names = [DATE_COLUMN, CATEGORY_COLUMN, "Confirmed", "Recovered", "Deaths"];
        let schema = Arc::new(Schema::new(
            names
                .iter()
                .map(|n| Field::new(*n, DataType::Utf8, true))
                .collect::<Vec<_>>(),
        ));
        let cols: Vec<ArrayRef> = (0..names.len())
            .map(|i| {
                let arr: StringArray = rows.iter().map(|r| Some(r[i])).collect();
                Arc::new(arr) as ArrayRef
            })
            .collect();
        RecordBatch::try_new(schema, cols).unwrap()
    }

    #[test]
    fn converts_metrics_to_f64_with_nulls() -> Result<()> {
        let batch = string_batch(&[
            ["2020-03-01", "Chile", "5", "0", ""],
            ["2020-03-02", "Chile", " 10 ", "1", "0"],
        ]);
        let table = convert_to_record_table(&batch)?;
        assert_eq!(table.schema(), record_schema());

        let confirmed = f64_column(&table, "Confirmed")?;
        assert_eq!(confirmed.value(0), 5.0);
        assert_eq!(confirmed.value(1), 10.0);

        let deaths = f64_column(&table, "Deaths")?;
        assert!(deaths.is_null(0));
        assert_eq!(deaths.value(1), 0.0);
        Ok(())
    }

    #[test]
    fn rejects_non_numeric_counts() {
        let batch = string_batch(&[["2020-03-01", "Chile", "five", "0", "0"]]);
        let err = convert_to_record_table(&batch).unwrap_err();
        assert!(format!("{:#}", err).contains("Confirmed"));
    }
}
