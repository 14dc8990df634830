use thiserror::Error;

/// Validation errors raised while building a panchang request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u8, day: u8 },

    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDateFormat { value: String },

    #[error("invalid time of day {hours:02}:{minutes:02}:{seconds:02}")]
    InvalidTime { hours: u8, minutes: u8, seconds: u8 },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
