//! Error types for the ta-app service layer.

/// Application error type that wraps errors from the backend crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Log error: {0}")]
    Log(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ta-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<ta_config::ConfigError> for AppError {
    fn from(err: ta_config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<ta_log::LogError> for AppError {
    fn from(err: ta_log::LogError) -> Self {
        AppError::Log(err.to_string())
    }
}

impl From<ta_results::ResultsError> for AppError {
    fn from(err: ta_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
