//! Client error types

use shared::RecognitionError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP error: {status} {message}")]
    Status { status: u16, message: String },

    /// Server processed the request but reported a failure
    #[error("{0}")]
    Rejected(String),

    /// `success` without a receipt
    #[error("Incomplete server response (receipt is missing)")]
    IncompleteResponse,

    /// Body could not be decoded or violates the receipt contract
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Image file is not a JPEG or PNG
    #[error("Unsupported image format: {0}. Use JPG or PNG")]
    UnsupportedFormat(String),

    /// Image file has no content
    #[error("Image file is empty: {0}")]
    EmptyImage(String),

    /// Reading the image failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for RecognitionError {
    /// Collapse every client failure into the single message the user sees
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) if e.is_timeout() => {
                RecognitionError::new("Connection failed: request timed out")
            }
            ClientError::Http(e) if e.is_decode() => {
                RecognitionError::new(format!("Invalid response: {e}"))
            }
            ClientError::Http(e) if e.is_builder() => {
                RecognitionError::new(format!("Invalid request: {e}"))
            }
            ClientError::Http(e) => RecognitionError::new(format!("Connection failed: {e}")),
            other => RecognitionError::new(other.to_string()),
        }
    }
}
