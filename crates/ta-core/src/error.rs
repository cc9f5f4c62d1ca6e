use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Length mismatch in channel '{channel}': {timestamps} timestamps, {values} values")]
    LengthMismatch {
        channel: String,
        timestamps: usize,
        values: usize,
    },

    #[error("Timestamps decrease in channel '{channel}' at index {index} ({previous} -> {current})")]
    NonMonotonic {
        channel: String,
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("Duplicate channel: {name}")]
    DuplicateChannel { name: String },
}
