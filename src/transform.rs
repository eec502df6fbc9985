//! Transform stage: drop unpriced rows and derive `total_revenue`.

use tracing::debug;

use crate::error::{TransformError, TransformResult};
use crate::extract::{PRICE, QUANTITY, TOTAL_REVENUE};
use crate::processing::{derive_column, drop_nulls};
use crate::types::{DataSet, DataType, Field, Value};

/// Clean and enrich an extracted sales table.
///
/// 1. Rows whose `price` is null are removed (surviving rows keep their order).
/// 2. `total_revenue = quantity * price` is computed for every surviving row with exact decimal
///    arithmetic. A null `quantity` yields a null `total_revenue`.
///
/// `total_revenue` is appended as the last column, or overwritten in place if the input already
/// carries one.
pub fn transform(dataset: &DataSet) -> TransformResult<DataSet> {
    let quantity_idx = require_column(dataset, QUANTITY)?;
    require_column(dataset, PRICE)?;

    let priced = drop_nulls(dataset, PRICE).ok_or_else(|| missing(dataset, PRICE))?;
    let price_idx = require_column(&priced, PRICE)?;

    let out = derive_column(
        &priced,
        Field::new(TOTAL_REVENUE, DataType::Decimal),
        |row_idx, row| {
            let price = match &row[price_idx] {
                Value::Decimal(p) => *p,
                other => return Err(mismatch(row_idx, PRICE, DataType::Decimal, other)),
            };
            let quantity = match &row[quantity_idx] {
                Value::Null => return Ok(Value::Null),
                Value::Int64(q) => *q,
                other => return Err(mismatch(row_idx, QUANTITY, DataType::Int64, other)),
            };
            price
                .checked_mul(quantity.into())
                .map(Value::Decimal)
                .ok_or(TransformError::Overflow {
                    row: row_idx,
                    quantity,
                    price,
                })
        },
    )?;

    debug!(
        input_rows = dataset.row_count(),
        output_rows = out.row_count(),
        dropped = dataset.row_count() - out.row_count(),
        "null prices dropped and total_revenue derived"
    );
    Ok(out)
}

fn require_column(dataset: &DataSet, column: &str) -> TransformResult<usize> {
    dataset
        .schema
        .index_of(column)
        .ok_or_else(|| missing(dataset, column))
}

fn missing(dataset: &DataSet, column: &str) -> TransformError {
    TransformError::MissingColumn {
        column: column.to_owned(),
        columns: dataset.schema.field_names().map(str::to_owned).collect(),
    }
}

fn mismatch(row: usize, column: &str, expected: DataType, found: &Value) -> TransformError {
    TransformError::TypeMismatch {
        row,
        column: column.to_owned(),
        expected,
        found: found.data_type(),
    }
}
