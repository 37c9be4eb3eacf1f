//! Receipt model
//!
//! Value types for a recognized receipt and its line items. A receipt is
//! built once from a successful recognition response; afterwards only the
//! per-item `selected_quantity` changes, and it changes by producing a new
//! item rather than mutating the old one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::saturating_sum;

/// One line of a recognized receipt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptItem {
    /// Opaque identifier, stable for the lifetime of the receipt
    pub id: String,
    /// Display label
    pub name: String,
    /// Total units of this item on the receipt (>= 1)
    pub quantity: i32,
    /// Price of one unit
    pub unit_price: Decimal,
    /// Line total as reported by the recognition service.
    /// Never recomputed locally; OCR rounding may make it differ from
    /// `unit_price * quantity`.
    pub total_price: Decimal,
    /// Units attributed to the current user, always in `[0, quantity]`
    #[serde(default)]
    pub selected_quantity: i32,
}

impl ReceiptItem {
    /// Create an unselected item
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: i32,
        unit_price: Decimal,
        total_price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            unit_price,
            total_price,
            selected_quantity: 0,
        }
    }

    /// Whether any unit is selected
    #[inline]
    pub fn is_selected(&self) -> bool {
        self.selected_quantity > 0
    }

    /// Whether every unit is selected
    #[inline]
    pub fn is_fully_selected(&self) -> bool {
        self.selected_quantity == self.quantity
    }

    /// Price of the selected units (`unit_price * selected_quantity`),
    /// saturating at the `Decimal` range
    #[inline]
    pub fn selected_price(&self) -> Decimal {
        self.unit_price
            .saturating_mul(Decimal::from(self.selected_quantity))
    }

    /// Return a copy with `selected_quantity` clamped into `[0, quantity]`
    pub fn with_selected_quantity(&self, qty: i32) -> Self {
        Self {
            selected_quantity: clamp_quantity(qty, self.quantity),
            ..self.clone()
        }
    }

    /// Select every unit of this item
    pub fn select_all(&self) -> Self {
        self.with_selected_quantity(self.quantity)
    }

    /// Deselect every unit of this item
    pub fn clear_selection(&self) -> Self {
        self.with_selected_quantity(0)
    }
}

/// Clamp a requested quantity into `[0, max]`
///
/// Total for any input, including a negative `max`.
#[inline]
pub fn clamp_quantity(qty: i32, max: i32) -> i32 {
    qty.min(max).max(0)
}

/// A recognized receipt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Receipt {
    pub id: String,
    /// Raw OCR output, opaque to the split logic
    pub raw_text: String,
    /// Items in receipt display order
    pub items: Vec<ReceiptItem>,
    /// Server-reported subtotal (informational)
    pub subtotal: Decimal,
    /// Server-reported total (informational)
    pub total: Decimal,
    /// Recognition confidence in `[0.0, 1.0]`; not used in split math
    pub confidence_score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub establishment_name: Option<String>,
    /// Free-form date as printed on the receipt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Receipt {
    /// Look up an item by id
    pub fn item(&self, item_id: &str) -> Option<&ReceiptItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Sum of the server-reported line totals
    pub fn items_total_price(&self) -> Decimal {
        saturating_sum(self.items.iter().map(|i| i.total_price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coffee() -> ReceiptItem {
        ReceiptItem::new("x1", "Coffee", 3, Decimal::new(1000, 2), Decimal::new(3000, 2))
    }

    #[test]
    fn test_new_item_is_unselected() {
        let item = coffee();
        assert_eq!(item.selected_quantity, 0);
        assert!(!item.is_selected());
        assert!(!item.is_fully_selected());
        assert_eq!(item.selected_price(), Decimal::ZERO);
    }

    #[test]
    fn test_with_selected_quantity_partial() {
        let item = coffee().with_selected_quantity(2);
        assert_eq!(item.selected_quantity, 2);
        assert!(item.is_selected());
        assert!(!item.is_fully_selected());
        assert_eq!(item.selected_price(), Decimal::new(2000, 2));
    }

    #[test]
    fn test_with_selected_quantity_clamps() {
        assert_eq!(coffee().with_selected_quantity(99).selected_quantity, 3);
        assert_eq!(coffee().with_selected_quantity(-4).selected_quantity, 0);
        assert_eq!(coffee().with_selected_quantity(i32::MIN).selected_quantity, 0);
    }

    #[test]
    fn test_select_all_and_clear() {
        let all = coffee().select_all();
        assert!(all.is_fully_selected());
        assert_eq!(all.selected_price(), Decimal::new(3000, 2));

        let none = all.clear_selection();
        assert_eq!(none.selected_quantity, 0);
    }

    #[test]
    fn test_with_selected_quantity_leaves_original_untouched() {
        let item = coffee();
        let _ = item.with_selected_quantity(3);
        assert_eq!(item.selected_quantity, 0);
    }

    #[test]
    fn test_selected_price_ignores_reported_total() {
        // OCR reported 29.99 for 3 x 10.00; the selection uses the unit price
        let mut item = coffee();
        item.total_price = Decimal::new(2999, 2);
        assert_eq!(item.select_all().selected_price(), Decimal::new(3000, 2));
        assert_eq!(item.total_price, Decimal::new(2999, 2));
    }

    #[test]
    fn test_selected_price_saturates() {
        let item = ReceiptItem::new("big", "Banquet", 10, Decimal::MAX / Decimal::TWO, Decimal::MAX);
        assert_eq!(item.with_selected_quantity(1).selected_price(), Decimal::MAX / Decimal::TWO);
        assert_eq!(item.select_all().selected_price(), Decimal::MAX);
    }

    #[test]
    fn test_deserialize_defaults_selection_to_zero() {
        let item: ReceiptItem = serde_json::from_str(
            r#"{"id":"i1","name":"Tea","quantity":2,"unit_price":4.5,"total_price":9.0}"#,
        )
        .unwrap();
        assert_eq!(item.selected_quantity, 0);
        assert_eq!(item.unit_price, Decimal::new(45, 1));
    }

    #[test]
    fn test_clamp_quantity_negative_max() {
        assert_eq!(clamp_quantity(5, -1), 0);
    }
}
