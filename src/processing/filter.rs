//! Row filtering for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Returns a new [`DataSet`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Returns a new [`DataSet`] without the rows whose `column` is [`Value::Null`].
///
/// Returns `None` if `column` does not exist.
pub fn drop_nulls(dataset: &DataSet, column: &str) -> Option<DataSet> {
    let idx = dataset.schema.index_of(column)?;
    Some(filter(dataset, |row| !row[idx].is_null()))
}
