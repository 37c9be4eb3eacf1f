//! Shared types for DivUp
//!
//! Receipt model, bill split derivation and the recognition boundary,
//! used by both the split engine and the recognition client.

pub mod money;
pub mod receipt;
pub mod recognition;
pub mod split;

// Re-exports
pub use receipt::{Receipt, ReceiptItem};
pub use recognition::{ReceiptImage, ReceiptRecognizer, RecognitionError};
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
pub use split::BillSplit;
