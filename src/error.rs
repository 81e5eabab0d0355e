use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeySweepError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Layout Not Found: {0}")]
    LayoutNotFound(String),

    #[error("Corpus Not Found: {0}")]
    CorpusNotFound(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type KsResult<T> = Result<T, KeySweepError>;
