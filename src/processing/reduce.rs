//! Reduction operations for [`crate::types::DataSet`].

use rust_decimal::Decimal;

use crate::types::{DataSet, DataType, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including nulls).
    Count,
    /// Sum numeric values, ignoring nulls.
    Sum,
    /// Minimum numeric value, ignoring nulls.
    Min,
    /// Maximum numeric value, ignoring nulls.
    Max,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the schema.
/// - For `Sum`/`Min`/`Max`, returns `Some(Value::Null)` if there are no non-null values, or if the
///   column is not numeric. Integer sums saturate instead of overflowing.
/// - For `Count`, always returns `Some(Value::Int64(row_count))`.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    let idx = dataset.schema.index_of(column)?;

    match op {
        ReduceOp::Count => Some(Value::Int64(dataset.row_count() as i64)),
        ReduceOp::Sum | ReduceOp::Min | ReduceOp::Max => {
            let data_type = dataset.schema.fields[idx].data_type;
            Some(reduce_numeric_typed(dataset, idx, data_type, op))
        }
    }
}

fn reduce_numeric_typed(dataset: &DataSet, idx: usize, data_type: DataType, op: ReduceOp) -> Value {
    match data_type {
        DataType::Int64 => {
            let acc = dataset.reduce_rows(None::<i64>, |acc, row| match &row[idx] {
                Value::Int64(v) => Some(match acc {
                    None => *v,
                    Some(a) => match op {
                        ReduceOp::Sum => a.saturating_add(*v),
                        ReduceOp::Min => a.min(*v),
                        ReduceOp::Max => a.max(*v),
                        ReduceOp::Count => unreachable!("count handled by caller"),
                    },
                }),
                _ => acc,
            });
            acc.map(Value::Int64).unwrap_or(Value::Null)
        }
        DataType::Decimal => {
            let acc = dataset.reduce_rows(None::<Decimal>, |acc, row| match &row[idx] {
                Value::Decimal(v) => Some(match acc {
                    None => *v,
                    Some(a) => match op {
                        ReduceOp::Sum => a.saturating_add(*v),
                        ReduceOp::Min => a.min(*v),
                        ReduceOp::Max => a.max(*v),
                        ReduceOp::Count => unreachable!("count handled by caller"),
                    },
                }),
                _ => acc,
            });
            acc.map(Value::Decimal).unwrap_or(Value::Null)
        }
        DataType::Utf8 | DataType::Date => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::{reduce, ReduceOp};
    use crate::types::{DataSet, DataType, Field, Schema, Value};
    use rust_decimal::Decimal;

    fn numeric_dataset_with_nulls() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("quantity", DataType::Int64),
            Field::new("total_revenue", DataType::Decimal),
        ]);

        let rows = vec![
            vec![Value::Int64(1), Value::Decimal(Decimal::new(1000, 2))],
            vec![Value::Int64(2), Value::Null],
            vec![Value::Int64(3), Value::Decimal(Decimal::new(550, 2))],
        ];

        DataSet::new(schema, rows)
    }

    #[test]
    fn reduce_count_counts_rows() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "total_revenue", ReduceOp::Count), Some(Value::Int64(3)));
    }

    #[test]
    fn reduce_sum_ignores_nulls_and_preserves_type() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(
            reduce(&ds, "total_revenue", ReduceOp::Sum),
            Some(Value::Decimal(Decimal::new(1550, 2)))
        );
        assert_eq!(reduce(&ds, "quantity", ReduceOp::Sum), Some(Value::Int64(6)));
    }

    #[test]
    fn reduce_min_max_ignore_nulls() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(
            reduce(&ds, "total_revenue", ReduceOp::Min),
            Some(Value::Decimal(Decimal::new(550, 2)))
        );
        assert_eq!(
            reduce(&ds, "total_revenue", ReduceOp::Max),
            Some(Value::Decimal(Decimal::new(1000, 2)))
        );
        assert_eq!(reduce(&ds, "quantity", ReduceOp::Min), Some(Value::Int64(1)));
        assert_eq!(reduce(&ds, "quantity", ReduceOp::Max), Some(Value::Int64(3)));
    }

    #[test]
    fn reduce_returns_none_for_missing_column() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "missing", ReduceOp::Count), None);
        assert_eq!(reduce(&ds, "missing", ReduceOp::Sum), None);
    }

    #[test]
    fn reduce_numeric_returns_null_if_all_values_null() {
        let schema = Schema::new(vec![Field::new("total_revenue", DataType::Decimal)]);
        let ds = DataSet::new(schema, vec![vec![Value::Null], vec![Value::Null]]);
        assert_eq!(reduce(&ds, "total_revenue", ReduceOp::Sum), Some(Value::Null));
        assert_eq!(reduce(&ds, "total_revenue", ReduceOp::Min), Some(Value::Null));
        assert_eq!(reduce(&ds, "total_revenue", ReduceOp::Max), Some(Value::Null));
    }
}
