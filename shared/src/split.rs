//! Bill split derivation
//!
//! A `BillSplit` is a pure view over `(items, tip_percentage)`. It is always
//! recomputed in full, never patched incrementally. Arithmetic saturates at
//! the `Decimal` range instead of overflowing, so any tip and any accepted
//! price yield a split.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{percentage_of, saturating_sum};
use crate::receipt::ReceiptItem;

/// The current user's share of the bill
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillSplit {
    /// Items with `selected_quantity > 0`, in receipt order
    pub selected_items: Vec<ReceiptItem>,
    /// Sum of `unit_price * selected_quantity` over the selection
    pub items_subtotal: Decimal,
    pub tip_percentage: Decimal,
    /// `items_subtotal * tip_percentage / 100`
    pub tip_amount: Decimal,
    /// `items_subtotal + tip_amount`
    pub total: Decimal,
}

impl BillSplit {
    /// Derive the split from the items' current selection and a tip rate
    ///
    /// The subtotal is built from unit prices, never from the server's
    /// `total_price`, so a partially selected line stays consistent.
    pub fn calculate(items: &[ReceiptItem], tip_percentage: Decimal) -> Self {
        let selected_items: Vec<ReceiptItem> =
            items.iter().filter(|i| i.is_selected()).cloned().collect();

        let items_subtotal = saturating_sum(selected_items.iter().map(|i| i.selected_price()));
        let tip_amount = percentage_of(items_subtotal, tip_percentage);

        Self {
            selected_items,
            items_subtotal,
            tip_percentage,
            tip_amount,
            total: items_subtotal.saturating_add(tip_amount),
        }
    }

    /// True when nothing is selected
    pub fn is_empty(&self) -> bool {
        self.selected_items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn items() -> Vec<ReceiptItem> {
        vec![
            ReceiptItem::new("a", "Burger", 1, dec("15.00"), dec("15.00")),
            ReceiptItem::new("b", "Soda", 2, dec("5.00"), dec("10.00")),
            ReceiptItem::new("c", "Fries", 4, dec("3.25"), dec("13.00")),
        ]
    }

    #[test]
    fn test_empty_selection() {
        let split = BillSplit::calculate(&items(), dec("10"));
        assert!(split.is_empty());
        assert_eq!(split.items_subtotal, Decimal::ZERO);
        assert_eq!(split.tip_amount, Decimal::ZERO);
        assert_eq!(split.total, Decimal::ZERO);
        assert_eq!(split.tip_percentage, dec("10"));
    }

    #[test]
    fn test_full_and_partial_selection() {
        let mut items = items();
        items[0] = items[0].select_all();
        items[2] = items[2].with_selected_quantity(1);

        let split = BillSplit::calculate(&items, dec("10"));
        assert_eq!(split.selected_items.len(), 2);
        assert_eq!(split.selected_items[0].id, "a");
        assert_eq!(split.selected_items[1].id, "c");
        assert_eq!(split.items_subtotal, dec("18.25"));
        assert_eq!(split.tip_amount, dec("1.825"));
        assert_eq!(split.total, dec("20.075"));
    }

    #[test]
    fn test_two_items_with_ten_percent_tip() {
        let mut items = items();
        items[0] = items[0].select_all();
        items[1] = items[1].select_all();

        let split = BillSplit::calculate(&items, dec("10"));
        assert_eq!(split.items_subtotal, dec("25.00"));
        assert_eq!(split.tip_amount, dec("2.50"));
        assert_eq!(split.total, dec("27.50"));
    }

    #[test]
    fn test_zero_tip() {
        let mut items = items();
        items[1] = items[1].with_selected_quantity(1);

        let split = BillSplit::calculate(&items, Decimal::ZERO);
        assert_eq!(split.items_subtotal, dec("5.00"));
        assert_eq!(split.tip_amount, Decimal::ZERO);
        assert_eq!(split.total, dec("5.00"));
    }

    #[test]
    fn test_huge_tip_saturates() {
        let mut items = items();
        items[0] = items[0].select_all();

        let split = BillSplit::calculate(&items, Decimal::MAX);
        assert_eq!(split.items_subtotal, dec("15.00"));
        assert_eq!(split.tip_amount, Decimal::MAX);
        assert_eq!(split.total, Decimal::MAX);
    }

    #[test]
    fn test_huge_prices_saturate() {
        let items = vec![
            ReceiptItem::new("x", "Yacht", 10, Decimal::MAX / Decimal::TWO, Decimal::MAX).select_all(),
            ReceiptItem::new("y", "Island", 1, Decimal::MAX, Decimal::MAX).select_all(),
        ];

        let split = BillSplit::calculate(&items, Decimal::TEN);
        assert_eq!(split.items_subtotal, Decimal::MAX);
        assert_eq!(split.tip_amount, Decimal::MAX / Decimal::TEN);
        assert_eq!(split.total, Decimal::MAX);
    }

    #[test]
    fn test_tip_above_hundred_is_not_clamped() {
        let mut items = items();
        items[0] = items[0].select_all();

        let split = BillSplit::calculate(&items, dec("150"));
        assert_eq!(split.tip_amount, dec("22.50"));
        assert_eq!(split.total, dec("37.50"));
    }
}
