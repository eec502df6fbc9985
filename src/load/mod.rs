//! Load stage: flat-file export plus incremental merge into the `daily_sales` store.
//!
//! [`load`] walks a fixed sequence of steps:
//!
//! ```text
//! Start -> FileWritten -> StoreSchemaEnsured -> DedupComputed -> (Merged | NoOp) -> Done
//! ```
//!
//! There is no rollback: an error aborts the remaining steps. The flat file and the store are not
//! updated atomically with respect to each other, so a failure after `FileWritten` leaves the
//! flat file newer than the store.

pub mod flat_file;
pub mod merge;
pub mod record;
pub mod store;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::LoadResult;
use crate::types::DataSet;

pub use flat_file::write_flat_file;
pub use merge::{new_records, NewBatch};
pub use record::{sales_records, SalesRecord, STORE_COLUMNS, STORE_DECIMAL_SCALE};
pub use store::{SalesStore, TABLE_NAME};

/// Options controlling the load stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Destination of the flat-file export.
    pub output_path: PathBuf,
    /// DuckDB database file holding the `daily_sales` table.
    pub store_path: PathBuf,
    /// Field delimiter byte for the flat file.
    pub delimiter: u8,
}

/// Steps of a single [`load`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStep {
    Start,
    FileWritten,
    StoreSchemaEnsured,
    DedupComputed,
    Merged,
    NoOp,
    Done,
}

/// Result of the store merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// At least one new record was appended.
    Merged { inserted: usize },
    /// Every record was already present.
    NoOp,
}

/// What a [`load`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub output_path: PathBuf,
    pub store_path: PathBuf,
    /// Data rows written to the flat file.
    pub rows_written: usize,
    /// Input rows whose key was already stored.
    pub existing_skipped: usize,
    /// Input rows repeating a key seen earlier in the same input.
    pub duplicates_in_batch: usize,
    pub outcome: MergeOutcome,
}

impl LoadReport {
    /// Rows appended to the store by this load.
    pub fn inserted(&self) -> usize {
        match self.outcome {
            MergeOutcome::Merged { inserted } => inserted,
            MergeOutcome::NoOp => 0,
        }
    }
}

/// Output of [`load`]: the input dataset, unchanged, and the report.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub dataset: DataSet,
    pub report: LoadReport,
}

/// Load stage entry point.
///
/// 1. Writes the flat file (overwriting).
/// 2. Converts the rows to store records. A missing store column, a null `transaction_id` or a
///    wrongly typed cell fails here, after the flat file exists and before the store is opened.
/// 3. Opens the store, creates `daily_sales` if absent, reads the stored keys.
/// 4. Appends the records with unseen keys in one transaction, or does nothing if there are none.
/// 5. Closes the store.
pub fn load(dataset: DataSet, options: &LoadOptions) -> LoadResult<Loaded> {
    let mut step = LoadStep::Start;

    let rows_written = write_flat_file(&dataset, &options.output_path, options.delimiter)?;
    advance(&mut step, LoadStep::FileWritten);
    info!(
        path = %options.output_path.display(),
        rows = rows_written,
        "flat file export successful"
    );

    let records = sales_records(&dataset)?;
    let mut store = SalesStore::open(&options.store_path)?;
    store.ensure_schema()?;
    advance(&mut step, LoadStep::StoreSchemaEnsured);

    let existing = store.existing_transaction_ids()?;
    let batch = new_records(records, &existing);
    advance(&mut step, LoadStep::DedupComputed);
    debug!(
        stored = existing.len(),
        new = batch.records.len(),
        existing_skipped = batch.existing_skipped,
        duplicates_in_batch = batch.duplicates_in_batch,
        "dedup computed"
    );

    let outcome = if batch.records.is_empty() {
        advance(&mut step, LoadStep::NoOp);
        info!("no new records to store");
        MergeOutcome::NoOp
    } else {
        let inserted = store.insert_batch(&batch.records)?;
        advance(&mut step, LoadStep::Merged);
        info!(inserted, table = TABLE_NAME, "new records stored");
        MergeOutcome::Merged { inserted }
    };

    store.close()?;
    advance(&mut step, LoadStep::Done);
    info!(path = %options.store_path.display(), "store merge successful");

    Ok(Loaded {
        dataset,
        report: LoadReport {
            output_path: options.output_path.clone(),
            store_path: options.store_path.clone(),
            rows_written,
            existing_skipped: batch.existing_skipped,
            duplicates_in_batch: batch.duplicates_in_batch,
            outcome,
        },
    })
}

fn advance(step: &mut LoadStep, next: LoadStep) {
    let from = *step;
    debug!(from = ?from, to = ?next, "load step");
    *step = next;
}
