//! Derived columns for [`crate::types::DataSet`].

use crate::types::{DataSet, Field, Value};

/// Returns a new [`DataSet`] with `field` computed from every row by `derive`.
///
/// `derive` receives the 0-based row position and the row. The first error aborts the
/// derivation. The column is appended, or replaced in place if `field.name` already exists.
pub fn derive_column<F, E>(dataset: &DataSet, field: Field, mut derive: F) -> Result<DataSet, E>
where
    F: FnMut(usize, &[Value]) -> Result<Value, E>,
{
    let values = dataset
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| derive(idx, row.as_slice()))
        .collect::<Result<Vec<_>, E>>()?;
    Ok(dataset.with_column(field, values))
}

#[cfg(test)]
mod tests {
    use super::derive_column;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn ids() -> DataSet {
        DataSet::new(
            Schema::new(vec![Field::new("id", DataType::Int64)]),
            vec![vec![Value::Int64(1)], vec![Value::Int64(2)], vec![Value::Null]],
        )
    }

    #[test]
    fn derive_column_appends_values_in_row_order() {
        let out = derive_column::<_, ()>(&ids(), Field::new("double", DataType::Int64), |_, row| {
            Ok(match row[0] {
                Value::Int64(v) => Value::Int64(v * 2),
                _ => Value::Null,
            })
        })
        .unwrap();

        assert_eq!(out.schema.field_names().collect::<Vec<_>>(), vec!["id", "double"]);
        assert_eq!(
            out.column_values("double").unwrap(),
            vec![&Value::Int64(2), &Value::Int64(4), &Value::Null]
        );
    }

    #[test]
    fn derive_column_stops_at_first_error() {
        let mut seen = Vec::new();
        let err = derive_column(&ids(), Field::new("x", DataType::Int64), |idx, _| {
            seen.push(idx);
            if idx == 1 { Err(format!("bad row {idx}")) } else { Ok(Value::Null) }
        })
        .unwrap_err();

        assert_eq!(err, "bad row 1");
        assert_eq!(seen, vec![0, 1]);
    }
}
