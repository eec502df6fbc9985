//! Mapping between [`DataSet`] rows and `daily_sales` records.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{LoadError, LoadResult};
use crate::extract::{PRICE, PRODUCT_ID, QUANTITY, TOTAL_REVENUE, TRANSACTION_DATE, TRANSACTION_ID};
use crate::types::{DataSet, DataType, Value};

/// Store columns, in table order.
pub const STORE_COLUMNS: [&str; 6] = [
    TRANSACTION_ID,
    PRODUCT_ID,
    QUANTITY,
    PRICE,
    TRANSACTION_DATE,
    TOTAL_REVENUE,
];

/// Fractional digits kept by the store's `DECIMAL(38, 10)` columns.
pub const STORE_DECIMAL_SCALE: u32 = 10;

/// One row of the `daily_sales` table.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub transaction_id: String,
    pub product_id: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<Decimal>,
    pub transaction_date: Option<NaiveDate>,
    pub total_revenue: Option<Decimal>,
}

/// Convert every row of `dataset` into a [`SalesRecord`], in row order.
///
/// Columns outside [`STORE_COLUMNS`] are ignored. Fails if a store column is missing, a
/// `transaction_id` is null, a cell does not hold its column's type, or a decimal has more than
/// [`STORE_DECIMAL_SCALE`] fractional digits (trailing zeros do not count).
pub fn sales_records(dataset: &DataSet) -> LoadResult<Vec<SalesRecord>> {
    let mut idx = [0usize; STORE_COLUMNS.len()];
    for (slot, column) in idx.iter_mut().zip(STORE_COLUMNS) {
        *slot = dataset
            .schema
            .index_of(column)
            .ok_or_else(|| LoadError::MissingColumn {
                column: column.to_owned(),
                columns: dataset.schema.field_names().map(str::to_owned).collect(),
            })?;
    }
    let [id_idx, product_idx, quantity_idx, price_idx, date_idx, revenue_idx] = idx;

    dataset
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let transaction_id =
                utf8(row_idx, TRANSACTION_ID, &row[id_idx])?.ok_or(LoadError::MissingKey { row: row_idx })?;
            Ok(SalesRecord {
                transaction_id,
                product_id: utf8(row_idx, PRODUCT_ID, &row[product_idx])?,
                quantity: int64(row_idx, QUANTITY, &row[quantity_idx])?,
                price: decimal(row_idx, PRICE, &row[price_idx])?,
                transaction_date: date(row_idx, TRANSACTION_DATE, &row[date_idx])?,
                total_revenue: decimal(row_idx, TOTAL_REVENUE, &row[revenue_idx])?,
            })
        })
        .collect()
}

fn utf8(row: usize, column: &str, value: &Value) -> LoadResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::Utf8(s) => Ok(Some(s.clone())),
        // Numeric-looking identifiers are still identifiers.
        Value::Int64(v) => Ok(Some(v.to_string())),
        other => Err(mismatch(row, column, DataType::Utf8, other)),
    }
}

fn int64(row: usize, column: &str, value: &Value) -> LoadResult<Option<i64>> {
    match value {
        Value::Null => Ok(None),
        Value::Int64(v) => Ok(Some(*v)),
        other => Err(mismatch(row, column, DataType::Int64, other)),
    }
}

fn decimal(row: usize, column: &str, value: &Value) -> LoadResult<Option<Decimal>> {
    match value {
        Value::Null => Ok(None),
        Value::Decimal(v) if v.normalize().scale() > STORE_DECIMAL_SCALE => {
            Err(LoadError::Precision {
                row,
                column: column.to_owned(),
                value: *v,
                max_scale: STORE_DECIMAL_SCALE,
            })
        }
        Value::Decimal(v) => Ok(Some(*v)),
        Value::Int64(v) => Ok(Some(Decimal::from(*v))),
        other => Err(mismatch(row, column, DataType::Decimal, other)),
    }
}

fn date(row: usize, column: &str, value: &Value) -> LoadResult<Option<NaiveDate>> {
    match value {
        Value::Null => Ok(None),
        Value::Date(v) => Ok(Some(*v)),
        other => Err(mismatch(row, column, DataType::Date, other)),
    }
}

fn mismatch(row: usize, column: &str, expected: DataType, found: &Value) -> LoadError {
    LoadError::TypeMismatch {
        row,
        column: column.to_owned(),
        expected,
        found: found.data_type(),
    }
}

#[cfg(test)]
mod tests {
    use super::sales_records;
    use crate::error::LoadError;
    use crate::types::{DataSet, DataType, Field, Schema, Value};
    use rust_decimal::Decimal;

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("transaction_id", DataType::Utf8),
            Field::new("product_id", DataType::Utf8),
            Field::new("quantity", DataType::Int64),
            Field::new("price", DataType::Decimal),
            Field::new("transaction_date", DataType::Date),
            Field::new("store_region", DataType::Utf8),
            Field::new("total_revenue", DataType::Decimal),
        ])
    }

    fn row(id: Value) -> Vec<Value> {
        vec![
            id,
            Value::Utf8("P-1".into()),
            Value::Int64(2),
            Value::Decimal(Decimal::new(350, 2)),
            Value::Date(chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
            Value::Utf8("north".into()),
            Value::Decimal(Decimal::new(700, 2)),
        ]
    }

    #[test]
    fn maps_store_columns_by_name_and_ignores_extras() {
        let ds = DataSet::new(schema(), vec![row(Value::Utf8("T1".into()))]);
        let records = sales_records(&ds).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].transaction_id, "T1");
        assert_eq!(records[0].quantity, Some(2));
        assert_eq!(records[0].total_revenue, Some(Decimal::new(700, 2)));
    }

    #[test]
    fn null_transaction_id_is_rejected() {
        let ds = DataSet::new(
            schema(),
            vec![row(Value::Utf8("T1".into())), row(Value::Null)],
        );
        assert!(matches!(sales_records(&ds), Err(LoadError::MissingKey { row: 1 })));
    }

    #[test]
    fn decimals_beyond_store_scale_are_rejected() {
        let mut long = row(Value::Utf8("T1".into()));
        long[3] = Value::Decimal(Decimal::new(12_345_678_901, 11));
        let ds = DataSet::new(schema(), vec![long]);

        let err = sales_records(&ds).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Precision { row: 0, ref column, max_scale: 10, .. } if column == "price"
        ));
    }

    #[test]
    fn trailing_zeros_do_not_count_against_store_scale() {
        let mut padded = row(Value::Utf8("T1".into()));
        // 1.5 written with twelve fractional digits.
        padded[6] = Value::Decimal(Decimal::new(1_500_000_000_000, 12));
        let ds = DataSet::new(schema(), vec![padded]);

        let records = sales_records(&ds).unwrap();
        assert_eq!(records[0].total_revenue, Some(Decimal::new(15, 1)));
    }

    #[test]
    fn missing_store_column_is_rejected() {
        let ds = DataSet::new(
            Schema::new(vec![Field::new("transaction_id", DataType::Utf8)]),
            vec![],
        );
        let err = sales_records(&ds).unwrap_err();
        assert!(err.to_string().contains("missing store column 'product_id'"));
    }
}
