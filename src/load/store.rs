//! DuckDB-backed `daily_sales` table store.

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use duckdb::{params, Connection};
use rust_decimal::Decimal;
use tracing::debug;

use super::record::SalesRecord;
use crate::error::{LoadError, LoadResult};
use crate::types::DATE_FORMAT;

/// Name of the persistent sales table.
pub const TABLE_NAME: &str = "daily_sales";

const CREATE_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS daily_sales (
    transaction_id VARCHAR PRIMARY KEY,
    product_id VARCHAR,
    quantity INTEGER,
    price DECIMAL(38, 10),
    transaction_date DATE,
    total_revenue DECIMAL(38, 10)
)";

// Decimals and dates are bound as text and cast by DuckDB. Bare DECIMAL is DECIMAL(18, 3); the
// scale here must match STORE_DECIMAL_SCALE.
const INSERT_SQL: &str = "
INSERT INTO daily_sales
    (transaction_id, product_id, quantity, price, transaction_date, total_revenue)
VALUES
    (?, ?, ?, CAST(? AS DECIMAL(38, 10)), CAST(? AS DATE), CAST(? AS DECIMAL(38, 10)))
ON CONFLICT DO NOTHING";

const SELECT_SQL: &str = "
SELECT
    transaction_id,
    product_id,
    CAST(quantity AS BIGINT),
    CAST(price AS VARCHAR),
    CAST(transaction_date AS VARCHAR),
    CAST(total_revenue AS VARCHAR)
FROM daily_sales
ORDER BY transaction_id";

type RawRow = (
    String,
    Option<String>,
    Option<i64>,
    Option<String>,
    Option<String>,
    Option<String>,
);

/// A connection to the persistent sales table.
///
/// The connection is scoped to one load: open it, use it, then [`SalesStore::close`] it.
pub struct SalesStore {
    conn: Connection,
}

impl SalesStore {
    /// Open (creating if needed) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| LoadError::StoreOpen {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "store opened");
        Ok(Self { conn })
    }

    /// Open a throwaway in-memory store.
    pub fn open_in_memory() -> LoadResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create the `daily_sales` table if it does not exist. An existing table is left untouched.
    pub fn ensure_schema(&self) -> LoadResult<()> {
        self.conn.execute_batch(CREATE_TABLE_SQL)?;
        Ok(())
    }

    /// Every `transaction_id` currently stored.
    pub fn existing_transaction_ids(&self) -> LoadResult<HashSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT transaction_id FROM daily_sales")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(ids)
    }

    /// Append `records` in a single transaction and return how many rows were inserted.
    ///
    /// Keys that already exist are skipped by the table's primary key (`ON CONFLICT DO NOTHING`),
    /// never updated. Decimals must have at most [`super::record::STORE_DECIMAL_SCALE`] fractional
    /// digits, as [`super::sales_records`] enforces; the cast rounds anything longer.
    pub fn insert_batch(&mut self, records: &[SalesRecord]) -> LoadResult<usize> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(INSERT_SQL)?;
            for record in records {
                inserted += stmt.execute(params![
                    record.transaction_id,
                    record.product_id,
                    record.quantity,
                    record.price.map(|d| d.to_string()),
                    record
                        .transaction_date
                        .map(|d| d.format(DATE_FORMAT).to_string()),
                    record.total_revenue.map(|d| d.to_string()),
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Number of stored rows.
    pub fn row_count(&self) -> LoadResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM daily_sales", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// All stored rows, ordered by `transaction_id`.
    pub fn records(&self) -> LoadResult<Vec<SalesRecord>> {
        let mut stmt = self.conn.prepare(SELECT_SQL)?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })?
            .collect::<Result<Vec<RawRow>, _>>()?;

        raw.into_iter()
            .map(|(transaction_id, product_id, quantity, price, date, revenue)| {
                Ok(SalesRecord {
                    transaction_id,
                    product_id,
                    quantity,
                    price: decode_decimal("price", price)?,
                    transaction_date: decode_date("transaction_date", date)?,
                    total_revenue: decode_decimal("total_revenue", revenue)?,
                })
            })
            .collect()
    }

    /// Close the connection, surfacing any error DuckDB reports while doing so.
    pub fn close(self) -> LoadResult<()> {
        self.conn.close().map_err(|(_, e)| LoadError::Store(e))
    }
}

fn decode_decimal(column: &str, raw: Option<String>) -> LoadResult<Option<Decimal>> {
    raw.map(|s| {
        Decimal::from_str(&s).map_err(|e| LoadError::Decode {
            column: column.to_owned(),
            message: e.to_string(),
            raw: s,
        })
    })
    .transpose()
}

fn decode_date(column: &str, raw: Option<String>) -> LoadResult<Option<NaiveDate>> {
    raw.map(|s| {
        NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|e| LoadError::Decode {
            column: column.to_owned(),
            message: e.to_string(),
            raw: s,
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::SalesStore;
    use crate::load::record::SalesRecord;
    use rust_decimal::Decimal;

    fn record(id: &str) -> SalesRecord {
        SalesRecord {
            transaction_id: id.to_string(),
            product_id: Some("P-9".to_string()),
            quantity: Some(3),
            price: Some(Decimal::new(1250, 2)),
            transaction_date: chrono::NaiveDate::from_ymd_opt(2024, 2, 29),
            total_revenue: Some(Decimal::new(3750, 2)),
        }
    }

    fn store() -> SalesStore {
        let store = SalesStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
    }

    #[test]
    fn ensure_schema_is_repeatable() {
        let store = store();
        store.ensure_schema().unwrap();
        assert_eq!(store.row_count().unwrap(), 0);
        assert!(store.existing_transaction_ids().unwrap().is_empty());
    }

    #[test]
    fn inserted_records_read_back_exactly() {
        let mut store = store();
        assert_eq!(store.insert_batch(&[record("T1")]).unwrap(), 1);

        let stored = store.records().unwrap();
        assert_eq!(stored, vec![record("T1")]);
    }

    #[test]
    fn nulls_round_trip_as_none() {
        let mut store = store();
        let sparse = SalesRecord {
            transaction_id: "T2".to_string(),
            product_id: None,
            quantity: None,
            price: Some(Decimal::ONE),
            transaction_date: None,
            total_revenue: None,
        };
        store.insert_batch(std::slice::from_ref(&sparse)).unwrap();
        assert_eq!(store.records().unwrap(), vec![sparse]);
    }

    #[test]
    fn conflicting_key_is_ignored_not_updated() {
        let mut store = store();
        store.insert_batch(&[record("T1")]).unwrap();

        let mut changed = record("T1");
        changed.quantity = Some(99);
        assert_eq!(store.insert_batch(&[changed]).unwrap(), 0);

        let stored = store.records().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].quantity, Some(3));
    }
}
