//! Receipt recognition boundary
//!
//! The OCR/AI service is an opaque collaborator: it takes an image and
//! either returns a [`Receipt`] or fails. Every transport or decoding problem
//! is normalized into a single [`RecognitionError`] message before it
//! reaches the split engine.

use async_trait::async_trait;
use thiserror::Error;

use crate::receipt::Receipt;

/// An image handed to the recognition service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptImage {
    /// Original file name, sent along with the upload
    pub file_name: String,
    /// MIME type, e.g. `image/jpeg`
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ReceiptImage {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Convenience constructor for JPEG payloads
    pub fn jpeg(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(file_name, "image/jpeg", bytes)
    }
}

/// Recognition failed; the message is shown to the user verbatim
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RecognitionError {
    message: String,
}

impl RecognitionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable failure message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Turns a receipt image into a parsed [`Receipt`]
#[async_trait]
pub trait ReceiptRecognizer: Send + Sync {
    async fn recognize(&self, image: ReceiptImage) -> Result<Receipt, RecognitionError>;
}
