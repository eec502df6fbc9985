use thiserror::Error;

use crate::types::DataType;

/// Convenience result type for the extract stage.
pub type ExtractResult<T> = Result<T, ExtractError>;
/// Convenience result type for the transform stage.
pub type TransformResult<T> = Result<T, TransformError>;
/// Convenience result type for the load stage.
pub type LoadResult<T> = Result<T, LoadError>;
/// Convenience result type for a full pipeline run.
pub type EtlResult<T> = Result<T, EtlError>;

/// Error returned when the source file cannot be read or parsed.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The delimited input is malformed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input has no header row.
    #[error("source has no header row")]
    EmptyHeader,

    /// Two source columns normalize to the same name.
    #[error("columns {first:?} and {second:?} both normalize to '{normalized}'")]
    DuplicateColumn {
        normalized: String,
        first: String,
        second: String,
    },

    /// A cell could not be parsed into its column's [`DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    Parse {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}

/// Error returned when the input table cannot be cleaned or enriched.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A column the transform depends on is absent from the schema.
    #[error("missing required column '{column}'. columns={columns:?}")]
    MissingColumn { column: String, columns: Vec<String> },

    /// A cell holds a value of the wrong type.
    #[error("row {row} column '{column}': expected {expected:?}, found {found:?}")]
    TypeMismatch {
        row: usize,
        column: String,
        expected: DataType,
        found: Option<DataType>,
    },

    /// `quantity * price` does not fit in a decimal.
    #[error("row {row}: total_revenue overflows ({quantity} * {price})")]
    Overflow {
        row: usize,
        quantity: i64,
        price: rust_decimal::Decimal,
    },
}

/// Error returned when the flat file cannot be written or the store merge fails.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O error writing the flat file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error writing the flat file.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The store database file could not be opened or created.
    #[error("cannot open store '{}': {source}", path.display())]
    StoreOpen {
        path: std::path::PathBuf,
        #[source]
        source: duckdb::Error,
    },

    /// DDL, query or insert failure in the table store.
    #[error("store error: {0}")]
    Store(#[from] duckdb::Error),

    /// The table lacks a column the store schema requires.
    #[error("missing store column '{column}'. columns={columns:?}")]
    MissingColumn { column: String, columns: Vec<String> },

    /// A value read back from the store could not be decoded.
    #[error("cannot decode store column '{column}' (raw='{raw}'): {message}")]
    Decode {
        column: String,
        raw: String,
        message: String,
    },

    /// A decimal has more fractional digits than the store column keeps.
    #[error("row {row} column '{column}': {value} has more than {max_scale} decimal places")]
    Precision {
        row: usize,
        column: String,
        value: rust_decimal::Decimal,
        max_scale: u32,
    },

    /// A row has a null primary key.
    #[error("row {row} has a null transaction_id")]
    MissingKey { row: usize },

    /// A cell holds a value of the wrong type for its store column.
    #[error("row {row} column '{column}': expected {expected:?}, found {found:?}")]
    TypeMismatch {
        row: usize,
        column: String,
        expected: DataType,
        found: Option<DataType>,
    },
}

/// Error returned by [`crate::pipeline::Pipeline::run`]: the first stage that failed.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("extract failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),

    #[error("load failed: {0}")]
    Load(#[from] LoadError),
}

/// Error returned while preparing a run (configuration and logging).
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The `etl.json` override file is not valid.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// The configured delimiter is not a single ASCII character.
    #[error("invalid delimiter {0:?}: expected a single ASCII character")]
    InvalidDelimiter(String),

    /// The global tracing subscriber could not be installed.
    #[error("logging error: {0}")]
    Logging(String),
}
