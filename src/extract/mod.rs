//! Extract stage: read the source file into a normalized [`crate::types::DataSet`].
//!
//! Most callers should use [`extract_from_path`], which:
//!
//! - reads every row of a delimited file with a header row
//! - normalizes header names with [`normalize_column_name`]
//! - parses cells according to [`ExtractOptions::column_types`]
//!
//! Row order and values are preserved; only column names change.

pub mod columns;
pub mod csv;

use std::path::Path;

use tracing::debug;

use crate::error::ExtractResult;
use crate::types::{DataSet, DataType, Field, Schema};

pub use self::columns::{normalize_column_name, normalize_column_names};
pub use self::csv::{extract_csv_from_path, extract_csv_from_reader, NULL_MARKERS};

/// Column names of a cleaned sales record, in store order.
pub const TRANSACTION_ID: &str = "transaction_id";
pub const PRODUCT_ID: &str = "product_id";
pub const QUANTITY: &str = "quantity";
pub const PRICE: &str = "price";
pub const TRANSACTION_DATE: &str = "transaction_date";
pub const TOTAL_REVENUE: &str = "total_revenue";

/// Type hints for the sales columns. Names are the normalized forms.
pub fn sales_column_types() -> Schema {
    Schema::new(vec![
        Field::new(TRANSACTION_ID, DataType::Utf8),
        Field::new(PRODUCT_ID, DataType::Utf8),
        Field::new(QUANTITY, DataType::Int64),
        Field::new(PRICE, DataType::Decimal),
        Field::new(TRANSACTION_DATE, DataType::Date),
        Field::new(TOTAL_REVENUE, DataType::Decimal),
    ])
}

/// Options controlling extraction.
///
/// Use [`Default`] for a comma-delimited sales extract.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Expected type per normalized column name. Unlisted columns are read as [`DataType::Utf8`].
    pub column_types: Schema,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            column_types: sales_column_types(),
        }
    }
}

/// Extract stage entry point.
///
/// # Examples
///
/// ```no_run
/// use daily_sales_etl::extract::{extract_from_path, ExtractOptions};
///
/// # fn main() -> Result<(), daily_sales_etl::ExtractError> {
/// let ds = extract_from_path("data/DE_daily_sales.csv", &ExtractOptions::default())?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn extract_from_path(path: impl AsRef<Path>, options: &ExtractOptions) -> ExtractResult<DataSet> {
    let path = path.as_ref();
    let ds = extract_csv_from_path(path, options)?;
    debug!(
        path = %path.display(),
        columns = ?ds.schema.field_names().collect::<Vec<_>>(),
        rows = ds.row_count(),
        "source extracted"
    );
    Ok(ds)
}
