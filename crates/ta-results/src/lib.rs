//! ta-results: analysis report export and series storage.

pub mod hash;
pub mod store;
pub mod types;

pub use hash::compute_report_id;
pub use store::{ReportStore, load_report, save_report};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Series not found for session {session_num}")]
    SeriesNotFound { session_num: usize },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}
