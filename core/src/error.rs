use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV import error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid date '{value}': {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },

    #[error("Total failure count is zero: cumulative percentages are undefined")]
    ZeroTotalFailures,

    #[error("Zero transaction count for '{name}' in {month}: accuracy is undefined")]
    ZeroDenominator { name: String, month: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
