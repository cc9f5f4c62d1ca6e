//! ta-log: readers for decoded telemetry logs.
//!
//! Binary robot logs are decoded by external tooling into one of two plain
//! formats, both of which load into a [`LogData`]:
//!
//! - JSON channel dump: `{"channels": {"<name>": [[t, value], ...]}}`
//! - long-format CSV: `timestamp,channel,value` with one sample per row

pub mod csv_log;
pub mod json_log;

use std::path::{Path, PathBuf};

use ta_core::{CoreError, LogData};

pub use csv_log::{parse_csv_value, read_csv};
pub use json_log::{parse_json_str, read_json};

pub type LogResult<T> = Result<T, LogError>;

#[derive(thiserror::Error, Debug)]
pub enum LogError {
    #[error("Failed to read log file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported log format: {path} (expected .json or .csv)")]
    UnsupportedFormat { path: PathBuf },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid channel data: {0}")]
    Channel(#[from] CoreError),
}

/// Supported decoded-log formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Csv,
}

impl LogFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

/// A decoded log together with the bytes it was parsed from.
#[derive(Debug, Clone)]
pub struct LoadedLog {
    pub format: LogFormat,
    pub data: LogData,
    pub bytes: Vec<u8>,
}

/// Read a decoded log, choosing the format from the file extension.
///
/// The file is read fully and closed before parsing starts.
pub fn read_log(path: &Path) -> LogResult<LoadedLog> {
    let format = LogFormat::from_path(path).ok_or_else(|| LogError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let bytes = std::fs::read(path).map_err(|source| LogError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let data = parse_log(&bytes, format)?;
    tracing::info!(
        path = %path.display(),
        channels = data.len(),
        bytes = bytes.len(),
        "loaded log"
    );
    Ok(LoadedLog {
        format,
        data,
        bytes,
    })
}

pub fn load_log(path: &Path) -> LogResult<LogData> {
    Ok(read_log(path)?.data)
}

pub fn parse_log(bytes: &[u8], format: LogFormat) -> LogResult<LogData> {
    match format {
        LogFormat::Json => read_json(bytes),
        LogFormat::Csv => read_csv(bytes),
    }
}
