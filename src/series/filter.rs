use crate::table::convert::string_column;
use anyhow::{Context, Result};
use arrow::{array::BooleanArray, compute::filter_record_batch, record_batch::RecordBatch};
use tracing::{debug, warn};

/// Keep the rows whose `column` equals `target` exactly.
///
/// An absent target yields an empty batch with the same schema.
pub fn filter_category(batch: &RecordBatch, column: &str, target: &str) -> Result<RecordBatch> {
    let labels = string_column(batch, column)?;
    let mask: BooleanArray = labels.iter().map(|v| Some(v == Some(target))).collect();

    let filtered = filter_record_batch(batch, &mask)
        .with_context(|| format!("filtering {} == {:?}", column, target))?;
    if filtered.num_rows() == 0 {
        warn!(column, target, "no rows for category");
    } else {
        debug!(column, target, rows = filtered.num_rows(), "filtered category");
    }
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{load::read_records, CATEGORY_COLUMN};

    const SAMPLE: &str = "Date,Country,Confirmed,Recovered,Deaths
2020-03-01,Chile,5,0,0
2020-03-01,Peru,3,0,0
2020-03-02,Chile,10,1,0
2020-03-02,chile,99,9,9
";

    #[test]
    fn keeps_only_exact_matches() -> Result<()> {
        let table = read_records(SAMPLE.as_bytes())?;
        let chile = filter_category(&table, CATEGORY_COLUMN, "Chile")?;
        assert_eq!(chile.num_rows(), 2);
        assert_eq!(chile.schema(), table.schema());
        let labels = string_column(&chile, CATEGORY_COLUMN)?;
        assert!(labels.iter().all(|v| v == Some("Chile")));
        Ok(())
    }

    #[test]
    fn absent_category_gives_empty_batch() -> Result<()> {
        let table = read_records(SAMPLE.as_bytes())?;
        let none = filter_category(&table, CATEGORY_COLUMN, "Narnia")?;
        assert_eq!(none.num_rows(), 0);
        assert_eq!(none.num_columns(), table.num_columns());
        Ok(())
    }
}
