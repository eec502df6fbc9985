//! In-memory data transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by extraction.
//! Stages compose these primitives rather than touching rows directly:
//!
//! - [`filter()`] / [`drop_nulls()`]: row filtering
//! - [`derive_column()`]: fallible per-row column derivation
//! - [`reduce()`]: common reductions (count/sum/min/max)
//!
//! ## Example: filter → derive → reduce
//!
//! ```rust
//! use daily_sales_etl::processing::{derive_column, drop_nulls, reduce, ReduceOp};
//! use daily_sales_etl::types::{DataSet, DataType, Field, Schema, Value};
//! use rust_decimal::Decimal;
//!
//! let schema = Schema::new(vec![
//!     Field::new("quantity", DataType::Int64),
//!     Field::new("price", DataType::Decimal),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(2), Value::Decimal(Decimal::new(150, 2))],
//!         vec![Value::Int64(4), Value::Null],
//!     ],
//! );
//!
//! let priced = drop_nulls(&ds, "price").unwrap();
//! let doubled = derive_column::<_, ()>(&priced, Field::new("double_price", DataType::Decimal), |_, row| {
//!     Ok(match &row[1] {
//!         Value::Decimal(p) => Value::Decimal(*p * Decimal::TWO),
//!         _ => Value::Null,
//!     })
//! })
//! .unwrap();
//!
//! let sum = reduce(&doubled, "double_price", ReduceOp::Sum).unwrap();
//! assert_eq!(sum, Value::Decimal(Decimal::new(300, 2)));
//! ```

pub mod derive;
pub mod filter;
pub mod reduce;

pub use derive::derive_column;
pub use filter::{drop_nulls, filter};
pub use reduce::{reduce, ReduceOp};
