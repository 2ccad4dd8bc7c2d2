use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    /// A core operation was invoked outside the call order it requires.
    #[error("Invalid Call Sequence: {0}")]
    Sequencing(String),

    #[error("Source Error: {0}")]
    Source(String),
}

pub type ReaderResult<T> = Result<T, ReaderError>;
