//! Delimited-file extraction.

use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::columns::normalize_column_name;
use super::ExtractOptions;
use crate::error::{ExtractError, ExtractResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Cell contents treated as a missing value (after trimming), in addition to the empty string.
pub const NULL_MARKERS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Extract a delimited file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - The file must have a header row.
/// - Header names are normalized with [`normalize_column_name`]; two headers that normalize to
///   the same name are rejected.
/// - Cells are parsed according to [`ExtractOptions::column_types`]; columns without a hint are
///   kept as [`DataType::Utf8`].
pub fn extract_csv_from_path(
    path: impl AsRef<Path>,
    options: &ExtractOptions,
) -> ExtractResult<DataSet> {
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .from_reader(file);
    extract_csv_from_reader(&mut rdr, options)
}

/// Extract delimited data from an existing CSV reader.
pub fn extract_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    options: &ExtractOptions,
) -> ExtractResult<DataSet> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(ExtractError::EmptyHeader);
    }

    let mut fields: Vec<Field> = Vec::with_capacity(headers.len());
    for (idx, raw) in headers.iter().enumerate() {
        let name = normalize_column_name(raw);
        if let Some(prev) = fields.iter().position(|f| f.name == name) {
            return Err(ExtractError::DuplicateColumn {
                normalized: name,
                first: headers.get(prev).unwrap_or_default().to_owned(),
                second: headers.get(idx).unwrap_or_default().to_owned(),
            });
        }
        let data_type = options
            .column_types
            .field(&name)
            .map(|f| f.data_type)
            .unwrap_or(DataType::Utf8);
        fields.push(Field::new(name, data_type));
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(fields.len());
        for (field, raw) in fields.iter().zip(record.iter()) {
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(Schema::new(fields), rows))
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> ExtractResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || NULL_MARKERS.contains(&trimmed) {
        return Ok(Value::Null);
    }

    let parse_err = |message: String| ExtractError::Parse {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(raw.to_owned())),
        DataType::Int64 => parse_int(trimmed).map(Value::Int64).map_err(parse_err),
        DataType::Decimal => parse_decimal(trimmed).map(Value::Decimal).map_err(parse_err),
        DataType::Date => parse_date(trimmed).map(Value::Date).map_err(parse_err),
    }
}

fn parse_int(s: &str) -> Result<i64, String> {
    match s.parse::<i64>() {
        Ok(v) => Ok(v),
        Err(int_err) => {
            // Integral columns are sometimes exported as floats ("3.0").
            let d = parse_decimal(s).map_err(|_| int_err.to_string())?;
            if d.fract().is_zero() {
                d.to_i64().ok_or_else(|| "integer out of range".to_string())
            } else {
                Err("expected an integer, found a fractional number".to_string())
            }
        }
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, String> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    Err("expected a date (YYYY-MM-DD)".to_string())
}

#[cfg(test)]
mod tests {
    use super::{parse_date, parse_decimal, parse_int};
    use rust_decimal::Decimal;

    #[test]
    fn int_accepts_float_with_zero_fraction() {
        assert_eq!(parse_int("3"), Ok(3));
        assert_eq!(parse_int("3.0"), Ok(3));
        assert!(parse_int("3.5").is_err());
        assert!(parse_int("three").is_err());
    }

    #[test]
    fn decimal_accepts_plain_and_scientific() {
        assert_eq!(parse_decimal("10.50"), Ok(Decimal::new(1050, 2)));
        assert_eq!(parse_decimal("1.5e2"), Ok(Decimal::new(150, 0)));
        assert!(parse_decimal("ten").is_err());
    }

    #[test]
    fn date_accepts_iso_slash_and_timestamp() {
        let expected = chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(parse_date("2024-01-05"), Ok(expected));
        assert_eq!(parse_date("2024/01/05"), Ok(expected));
        assert_eq!(parse_date("2024-01-05 13:45:00"), Ok(expected));
        assert!(parse_date("05.01.2024").is_err());
    }
}
