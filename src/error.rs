//! Error handling for the resume fit analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeFitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeFitError>;

/// Convert anyhow errors (surfaced by the embedding model loader) to our error type
impl From<anyhow::Error> for ResumeFitError {
    fn from(err: anyhow::Error) -> Self {
        ResumeFitError::ModelLoading(err.to_string())
    }
}
