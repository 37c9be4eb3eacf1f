//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | RECOGNITION_BASE_URL | http://localhost:8001 | Recognition service address |
//! | RECOGNITION_TIMEOUT_SECS | 60 | Recognition request timeout |

/// Receipt processing endpoint, relative to the base URL
pub const PROCESS_ENDPOINT: &str = "api/v1/receipt/process";

/// Health endpoint, relative to the base URL
pub const HEALTH_ENDPOINT: &str = "api/v1/receipt/health";

const DEFAULT_BASE_URL: &str = "http://localhost:8001";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client configuration for connecting to the recognition service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8001")
    pub base_url: String,

    /// Receipt processing path
    pub endpoint: String,

    /// Request timeout in seconds; OCR of a large photo can take a while
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            endpoint: PROCESS_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load `RECOGNITION_BASE_URL` and `RECOGNITION_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    ///
    /// Unset or blank values fall back to defaults; a malformed timeout is
    /// logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("RECOGNITION_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup("RECOGNITION_TIMEOUT_SECS") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %value, "Invalid RECOGNITION_TIMEOUT_SECS, using default");
                DEFAULT_TIMEOUT_SECS
            }),
        };

        Self::new(base_url).with_timeout(timeout)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the receipt processing path
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Create a recognition client from this configuration
    pub fn build(&self) -> crate::ClientResult<super::RecognitionClient> {
        super::RecognitionClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
