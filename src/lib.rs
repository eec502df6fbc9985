//! `daily-sales-etl` is a small batch pipeline for a daily sales extract.
//!
//! It reads a delimited file into an in-memory [`types::DataSet`], cleans it, derives
//! `total_revenue`, and persists the result twice: as a flat file, and as an incremental merge
//! into a DuckDB table keyed by `transaction_id`.
//!
//! The primary entrypoint is [`pipeline::Pipeline::run`], which chains the three stages and stops
//! at the first failure.
//!
//! ## Stages
//!
//! - **Extract** ([`extract::extract_from_path`]): reads every row, normalizes column names
//!   (`" Transaction ID! "` becomes `transaction_id`) and parses the sales columns into typed
//!   [`types::Value`]s.
//! - **Transform** ([`transform::transform`]): drops rows with a null `price` and appends
//!   `total_revenue = quantity * price` (exact decimal arithmetic; null quantity gives null
//!   revenue).
//! - **Load** ([`load::load`]): overwrites the flat file, then appends only the records whose
//!   `transaction_id` is not already in the `daily_sales` table. Existing rows are never updated.
//!
//! ## Quick example: run every stage
//!
//! ```no_run
//! use daily_sales_etl::config::EtlConfig;
//! use daily_sales_etl::pipeline::Pipeline;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EtlConfig::from_current_dir()?;
//! let _guard = daily_sales_etl::logging::init(&config.log_path)?;
//! let summary = Pipeline::new(config).run()?;
//! println!("inserted={}", summary.load.inserted());
//! # Ok(())
//! # }
//! ```
//!
//! ## Stage-by-stage example
//!
//! ```rust
//! use daily_sales_etl::extract::{extract_csv_from_reader, ExtractOptions};
//! use daily_sales_etl::transform::transform;
//! use daily_sales_etl::types::Value;
//! use rust_decimal::Decimal;
//!
//! let input = " Transaction ID! ,Product ID,Quantity,Price,Transaction Date\n\
//!              T1,P1,2,1.25,2024-01-05\n\
//!              T2,P1,1,,2024-01-05\n";
//! let mut rdr = csv::ReaderBuilder::new().from_reader(input.as_bytes());
//! let ds = extract_csv_from_reader(&mut rdr, &ExtractOptions::default()).unwrap();
//! assert_eq!(ds.schema.index_of("transaction_id"), Some(0));
//!
//! let clean = transform(&ds).unwrap();
//! assert_eq!(clean.row_count(), 1);
//! assert_eq!(
//!     clean.column_values("total_revenue").unwrap(),
//!     vec![&Value::Decimal(Decimal::new(250, 2))]
//! );
//! ```
//!
//! ## Modules
//!
//! - [`extract`]: column normalization and delimited-file extraction
//! - [`transform`]: null-price filtering and revenue derivation
//! - [`load`]: flat-file export and the DuckDB incremental merge
//! - [`processing`]: in-memory dataset primitives (filter/derive/reduce)
//! - [`pipeline`]: stage orchestration
//! - [`observability`]: stage outcome observers
//! - [`config`], [`logging`]: run setup
//! - [`types`]: schema + in-memory dataset types
//! - [`error`]: error types per stage

pub mod config;
pub mod error;
pub mod extract;
pub mod load;
pub mod logging;
pub mod observability;
pub mod pipeline;
pub mod processing;
pub mod transform;
pub mod types;

pub use error::{EtlError, EtlResult, ExtractError, LoadError, SetupError, TransformError};
