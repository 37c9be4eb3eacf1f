//! DivUp Client - HTTP client for the receipt recognition service
//!
//! Uploads a receipt photo, decodes the parsed receipt and normalizes every
//! failure into a single [`shared::RecognitionError`] message.

pub mod config;
pub mod dto;
pub mod error;
pub mod http;
pub mod image;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::RecognitionClient;
pub use image::load_receipt_image;
