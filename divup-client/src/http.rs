//! HTTP client for the receipt recognition service

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{Receipt, ReceiptImage, ReceiptRecognizer, RecognitionError};
use std::time::Instant;

use crate::config::HEALTH_ENDPOINT;
use crate::dto::ProcessReceiptResponse;
use crate::{ClientConfig, ClientError, ClientResult};

/// Multipart field the service reads the image from
const IMAGE_FIELD: &str = "file";

/// HTTP client for the recognition service
#[derive(Debug, Clone)]
pub struct RecognitionClient {
    client: Client,
    base_url: String,
    endpoint: String,
}

impl RecognitionClient {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            endpoint: config.endpoint.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Upload a receipt image and return the parsed receipt
    pub async fn process_receipt(&self, image: ReceiptImage) -> ClientResult<Receipt> {
        let url = self.url(&self.endpoint);
        let size = image.bytes.len();
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        tracing::debug!(url = %url, bytes = size, "Uploading receipt image");
        let started = Instant::now();
        let response = self.client.post(&url).multipart(form).send().await?;
        let body: ProcessReceiptResponse = Self::handle_response(response).await?;

        tracing::info!(
            success = body.success,
            server_ms = body.processing_time_ms,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Recognition response received"
        );
        body.into_receipt()
    }

    /// Check whether the service reports itself healthy
    pub async fn health(&self) -> ClientResult<bool> {
        #[derive(serde::Deserialize)]
        struct HealthResponse {
            status: String,
        }

        let response = self.client.get(self.url(HEALTH_ENDPOINT)).send().await?;
        let health: HealthResponse = Self::handle_response(response).await?;
        Ok(health.status == "healthy")
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: status_message(status, &bytes),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

/// Reason phrase, plus the `detail` field when the body carries one
fn status_message(status: StatusCode, body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: Option<String>,
    }

    let reason = status.canonical_reason().unwrap_or("Unknown status");
    match serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
    {
        Some(detail) => format!("{reason}: {detail}"),
        None => reason.to_string(),
    }
}

#[async_trait]
impl ReceiptRecognizer for RecognitionClient {
    async fn recognize(&self, image: ReceiptImage) -> Result<Receipt, RecognitionError> {
        self.process_receipt(image).await.map_err(|e| {
            tracing::warn!(error = %e, "Receipt recognition request failed");
            RecognitionError::from(e)
        })
    }
}
