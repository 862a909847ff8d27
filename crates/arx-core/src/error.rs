use thiserror::Error;

pub type ArxResult<T> = Result<T, ArxError>;

#[derive(Debug, Error)]
pub enum ArxError {
    /// Malformed request or configuration. Surfaced before any I/O happens.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication failure or malformed/truncated ciphertext framing.
    #[error("framing error: {0}")]
    Framing(String),

    /// Failure computing or rendering a content digest.
    #[error("digest error: {0}")]
    Digest(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
