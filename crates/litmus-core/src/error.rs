use thiserror::Error;

#[derive(Error, Debug)]
pub enum LitmusError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// No file was selected, or the selected file cannot be read.
    /// Surfaced before any network request is made.
    #[error("{0}")]
    Validation(String),

    /// The analysis service answered with a non-success status.
    /// Carries the server-provided error message.
    #[error("{0}")]
    Service(String),

    /// The request never completed, or the response body was not
    /// valid JSON for the expected shape.
    #[error("{0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LitmusError>;
