//! Loading receipt photos from disk

use shared::ReceiptImage;
use std::path::Path;

use crate::{ClientError, ClientResult};

/// Extensions the recognition service accepts
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Read an image file into a [`ReceiptImage`]
///
/// Only JPEG and PNG files are accepted; the MIME type is guessed from the
/// extension.
pub async fn load_receipt_image(path: impl AsRef<Path>) -> ClientResult<ReceiptImage> {
    let path = path.as_ref();
    let path_display = path.display().to_string();

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ClientError::UnsupportedFormat(path_display));
    }

    let bytes = tokio::fs::read(path).await?;
    if bytes.is_empty() {
        return Err(ClientError::EmptyImage(path_display));
    }

    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("receipt.jpg")
        .to_string();

    tracing::debug!(file = %path_display, bytes = bytes.len(), content_type = %content_type, "Loaded receipt image");
    Ok(ReceiptImage::new(file_name, content_type, bytes))
}
