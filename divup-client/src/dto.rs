//! Wire types of the recognition service
//!
//! Monetary fields travel as JSON floats and become `Decimal` here. A body
//! that breaks the receipt contract (quantity below 1, negative or
//! non-finite prices) is rejected as [`ClientError::InvalidResponse`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::money::to_decimal;
use shared::{Receipt, ReceiptItem};
use std::collections::HashSet;

use crate::{ClientError, ClientResult};

/// Response of `POST /api/v1/receipt/process`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessReceiptResponse {
    pub success: bool,
    #[serde(default)]
    pub receipt: Option<ReceiptDto>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptDto {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub raw_text: String,
    pub items: Vec<ReceiptItemDto>,
    pub subtotal: f64,
    pub total: f64,
    #[serde(default)]
    pub confidence_score: f32,
    #[serde(default)]
    pub establishment_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptItemDto {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub unit_price: f64,
    pub total_price: f64,
    /// Per-item OCR confidence (not carried into the model)
    #[serde(default)]
    pub confidence: f32,
}

fn default_quantity() -> i32 {
    1
}

impl ProcessReceiptResponse {
    /// Turn the envelope into a receipt or the server's failure
    pub fn into_receipt(self) -> ClientResult<Receipt> {
        if !self.success {
            return Err(ClientError::Rejected(
                self.error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| "Receipt processing failed on the server".to_string()),
            ));
        }
        self.receipt
            .ok_or(ClientError::IncompleteResponse)?
            .try_into()
    }
}

impl TryFrom<ReceiptDto> for Receipt {
    type Error = ClientError;

    fn try_from(dto: ReceiptDto) -> ClientResult<Self> {
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(dto.items.len());

        for (index, item) in dto.items.into_iter().enumerate() {
            let mut item = ReceiptItem::try_from(item)
                .map_err(|e| ClientError::InvalidResponse(format!("item {}: {}", index + 1, e)))?;

            // Selection is keyed by id, so ids must be unique within a receipt
            if item.id.is_empty() || !seen.insert(item.id.clone()) {
                let fresh = uuid::Uuid::new_v4().to_string();
                if !item.id.is_empty() {
                    tracing::warn!(item_id = %item.id, new_id = %fresh, "Duplicate item id, reassigned");
                }
                seen.insert(fresh.clone());
                item.id = fresh;
            }
            items.push(item);
        }

        let id = if dto.id.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            dto.id
        };
        let confidence_score = if dto.confidence_score.is_finite() {
            dto.confidence_score.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Ok(Receipt {
            id,
            raw_text: dto.raw_text,
            items,
            subtotal: finite(dto.subtotal, "subtotal")?,
            total: finite(dto.total, "total")?,
            confidence_score,
            establishment_name: dto.establishment_name.filter(|s| !s.trim().is_empty()),
            date: dto.date.filter(|s| !s.trim().is_empty()),
        })
    }
}

impl TryFrom<ReceiptItemDto> for ReceiptItem {
    type Error = String;

    fn try_from(dto: ReceiptItemDto) -> Result<Self, String> {
        if dto.quantity < 1 {
            return Err(format!("quantity must be at least 1, got {}", dto.quantity));
        }
        let unit_price = non_negative(dto.unit_price, "unit_price")?;
        let total_price = non_negative(dto.total_price, "total_price")?;
        if unit_price.checked_mul(Decimal::from(dto.quantity)).is_none() {
            return Err(format!(
                "unit_price {} x quantity {} is out of range",
                dto.unit_price, dto.quantity
            ));
        }

        Ok(ReceiptItem::new(
            dto.id,
            dto.name,
            dto.quantity,
            unit_price,
            total_price,
        ))
    }
}

fn finite(value: f64, field: &str) -> ClientResult<Decimal> {
    to_decimal(value).ok_or_else(|| {
        ClientError::InvalidResponse(format!("{field} must be a finite number, got {value}"))
    })
}

fn non_negative(value: f64, field: &str) -> Result<Decimal, String> {
    match to_decimal(value) {
        Some(d) if d >= Decimal::ZERO => Ok(d),
        _ => Err(format!("{field} must be a non-negative number, got {value}")),
    }
}
