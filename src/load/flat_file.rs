//! Delimited flat-file export.

use std::fs;
use std::path::Path;

use crate::error::LoadResult;
use crate::types::DataSet;

/// Write `dataset` to `path` as a delimited file and return the number of data rows written.
///
/// - A header row with the column names comes first; there is no index column.
/// - Rows are written contiguously in dataset order.
/// - An existing file is overwritten; a missing parent directory is created.
/// - Cells are rendered with [`crate::types::Value`]'s `Display` (nulls as empty fields).
pub fn write_flat_file(dataset: &DataSet, path: impl AsRef<Path>, delimiter: u8) -> LoadResult<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;
    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(ToString::to_string))?;
    }
    wtr.flush()?;

    Ok(dataset.row_count())
}

#[cfg(test)]
mod tests {
    use super::write_flat_file;
    use crate::types::{DataSet, DataType, Field, Schema, Value};
    use rust_decimal::Decimal;

    #[test]
    fn writes_header_and_rows_without_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        let ds = DataSet::new(
            Schema::new(vec![
                Field::new("transaction_id", DataType::Utf8),
                Field::new("quantity", DataType::Int64),
                Field::new("price", DataType::Decimal),
            ]),
            vec![
                vec![Value::Utf8("T1".into()), Value::Int64(2), Value::Decimal(Decimal::new(1050, 2))],
                vec![Value::Utf8("T, 2".into()), Value::Null, Value::Decimal(Decimal::new(3, 0))],
            ],
        );

        assert_eq!(write_flat_file(&ds, &path, b',').unwrap(), 2);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "transaction_id,quantity,price\nT1,2,10.50\n\"T, 2\",,3\n");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents that are much longer than the new file\n").unwrap();

        let ds = DataSet::new(Schema::new(vec![Field::new("a", DataType::Utf8)]), vec![]);
        write_flat_file(&ds, &path, b';').unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\n");
    }
}
