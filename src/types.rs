//! Core data model for the pipeline.
//!
//! Every stage works on an in-memory [`DataSet`]: a [`Schema`] (an ordered list of typed
//! [`Field`]s) plus row-major [`Value`] storage.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Date format used when rendering [`Value::Date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// UTF-8 string.
    Utf8,
    /// 64-bit signed integer.
    Int64,
    /// Exact decimal number.
    Decimal,
    /// Calendar date without a time zone.
    Date,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A list of fields describing the shape of a [`DataSet`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns the field with the given name, if present.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// UTF-8 string.
    Utf8(String),
    /// 64-bit signed integer.
    Int64(i64),
    /// Exact decimal.
    Decimal(Decimal),
    /// Calendar date.
    Date(NaiveDate),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the logical type of a non-null value.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Utf8(_) => Some(DataType::Utf8),
            Value::Int64(_) => Some(DataType::Int64),
            Value::Decimal(_) => Some(DataType::Decimal),
            Value::Date(_) => Some(DataType::Date),
        }
    }
}

/// Renders the value the way it is written to delimited files. `Null` renders as an empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Utf8(s) => f.write_str(s),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields. Row positions
/// are always contiguous from `0`; there is no separate index.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Values of a single column in row order, or `None` if the column does not exist.
    pub fn column_values(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema and the relative order of kept rows.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new dataset with `field` set to `values`.
    ///
    /// If a column with the same name exists it is replaced in place (keeping its position),
    /// otherwise the column is appended.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` differs from the row count.
    pub fn with_column(&self, field: Field, values: Vec<Value>) -> Self {
        assert!(
            values.len() == self.row_count(),
            "column length {} does not match row count {}",
            values.len(),
            self.row_count()
        );

        let mut schema = self.schema.clone();
        let existing = schema.index_of(&field.name);
        match existing {
            Some(idx) => schema.fields[idx] = field,
            None => schema.fields.push(field),
        }

        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, value)| {
                let mut out = row.clone();
                match existing {
                    Some(idx) => out[idx] = value,
                    None => out.push(value),
                }
                out
            })
            .collect();

        Self { schema, rows }
    }

    /// Reduce (fold) all rows into an accumulator value.
    ///
    /// This is similar to `Iterator::fold`, but provides each row as `&[Value]`.
    pub fn reduce_rows<A, F>(&self, init: A, mut reducer: F) -> A
    where
        F: FnMut(A, &[Value]) -> A,
    {
        self.rows
            .iter()
            .fold(init, |acc, row| reducer(acc, row.as_slice()))
    }
}
