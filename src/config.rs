//! Run configuration.
//!
//! The binary takes no flags: every path is derived from the working directory. An optional
//! `etl.json` in that directory can override any of them:
//!
//! ```json
//! { "input_path": "data/other.csv", "delimiter": ";" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SetupError;
use crate::extract::ExtractOptions;
use crate::load::LoadOptions;

/// Default source file, relative to the working directory.
pub const DEFAULT_INPUT: &str = "data/DE_daily_sales.csv";
/// Default flat-file export, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "output/daily_sales_cleaned.csv";
/// Default DuckDB file, relative to the working directory.
pub const DEFAULT_STORE: &str = "indonesiare.duckdb";
/// Default log file, relative to the working directory.
pub const DEFAULT_LOG: &str = "daily_sales_etl.log";
/// Name of the optional override file.
pub const OVERRIDES_FILE: &str = "etl.json";

/// Resolved configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtlConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub store_path: PathBuf,
    pub log_path: PathBuf,
    pub delimiter: u8,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Overrides {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    store_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
    delimiter: Option<String>,
}

impl EtlConfig {
    /// Defaults relative to `dir`, without reading any override file.
    pub fn defaults(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            input_path: dir.join(DEFAULT_INPUT),
            output_path: dir.join(DEFAULT_OUTPUT),
            store_path: dir.join(DEFAULT_STORE),
            log_path: dir.join(DEFAULT_LOG),
            delimiter: b',',
        }
    }

    /// Defaults relative to `dir`, with `dir/etl.json` applied if it exists.
    ///
    /// Relative override paths resolve against `dir`.
    pub fn from_working_dir(dir: impl AsRef<Path>) -> Result<Self, SetupError> {
        let dir = dir.as_ref();
        let mut config = Self::defaults(dir);

        let overrides_path = dir.join(OVERRIDES_FILE);
        if !overrides_path.exists() {
            return Ok(config);
        }
        let overrides: Overrides = serde_json::from_str(&fs::read_to_string(&overrides_path)?)?;

        let resolve = |p: PathBuf| if p.is_absolute() { p } else { dir.join(p) };
        if let Some(p) = overrides.input_path {
            config.input_path = resolve(p);
        }
        if let Some(p) = overrides.output_path {
            config.output_path = resolve(p);
        }
        if let Some(p) = overrides.store_path {
            config.store_path = resolve(p);
        }
        if let Some(p) = overrides.log_path {
            config.log_path = resolve(p);
        }
        if let Some(d) = overrides.delimiter {
            config.delimiter = parse_delimiter(&d)?;
        }
        Ok(config)
    }

    /// [`Self::from_working_dir`] for the process's current directory.
    pub fn from_current_dir() -> Result<Self, SetupError> {
        Self::from_working_dir(std::env::current_dir()?)
    }

    /// Options for the extract stage.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            delimiter: self.delimiter,
            ..ExtractOptions::default()
        }
    }

    /// Options for the load stage.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            output_path: self.output_path.clone(),
            store_path: self.store_path.clone(),
            delimiter: self.delimiter,
        }
    }
}

fn parse_delimiter(raw: &str) -> Result<u8, SetupError> {
    match raw.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ if raw == "\\t" => Ok(b'\t'),
        _ => Err(SetupError::InvalidDelimiter(raw.to_owned())),
    }
}
