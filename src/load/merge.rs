//! Key-based deduplication for the incremental merge.

use std::collections::HashSet;

use super::record::SalesRecord;

/// Records that are not yet in the store, plus what was left out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewBatch {
    /// Records to insert, in input order.
    pub records: Vec<SalesRecord>,
    /// Input records whose key already exists in the store.
    pub existing_skipped: usize,
    /// Input records repeating a key seen earlier in the same input.
    pub duplicates_in_batch: usize,
}

/// Keep the records whose `transaction_id` is neither in `existing` nor repeated earlier in
/// `records`. The first occurrence of a repeated key wins.
pub fn new_records(records: Vec<SalesRecord>, existing: &HashSet<String>) -> NewBatch {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    let mut batch = NewBatch::default();

    for record in records {
        if existing.contains(&record.transaction_id) {
            batch.existing_skipped += 1;
        } else if !seen.insert(record.transaction_id.clone()) {
            batch.duplicates_in_batch += 1;
        } else {
            batch.records.push(record);
        }
    }
    batch
}
