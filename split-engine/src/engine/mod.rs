//! SplitEngine - selection state and bill split derivation
//!
//! The engine owns the current receipt, a sparse selection mapping
//! (`item_id -> selected_quantity`) and the tip percentage. Items that are
//! not selected are simply absent from the mapping.
//!
//! # Operation Flow
//!
//! ```text
//! mutation(args)
//!     ├─ 1. No receipt / unknown item → no-op
//!     ├─ 2. Update selection mapping (clamped) or tip
//!     └─ 3. Re-derive SplitSnapshot from (receipt, mapping, tip)
//! ```
//!
//! Every operation is total: out-of-range quantities are clamped and
//! unknown ids are ignored, nothing here returns an error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::receipt::clamp_quantity;
use shared::{BillSplit, Receipt};
use std::collections::HashMap;

/// Tip percentage used when nothing else is configured
pub const DEFAULT_TIP_PERCENTAGE: Decimal = Decimal::TEN;

/// The state the presentation layer renders after each mutation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SplitSnapshot {
    /// Receipt whose items carry the current `selected_quantity`
    pub receipt: Receipt,
    pub bill_split: BillSplit,
    pub tip_percentage: Decimal,
}

/// Bill splitting state holder
///
/// Single writer: all mutation goes through `&mut self` and is synchronous.
#[derive(Debug, Clone)]
pub struct SplitEngine {
    receipt: Option<Receipt>,
    selection: HashMap<String, i32>,
    tip_percentage: Decimal,
}

impl Default for SplitEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TIP_PERCENTAGE)
    }
}

impl SplitEngine {
    /// Create an engine with no receipt and the given starting tip
    pub fn new(tip_percentage: Decimal) -> Self {
        Self {
            receipt: None,
            selection: HashMap::new(),
            tip_percentage,
        }
    }

    /// Current tip percentage
    pub fn tip_percentage(&self) -> Decimal {
        self.tip_percentage
    }

    /// Whether a receipt is loaded
    pub fn has_receipt(&self) -> bool {
        self.receipt.is_some()
    }

    /// Selected quantity for an item (0 when not selected or unknown)
    pub fn selected_quantity(&self, item_id: &str) -> i32 {
        self.selection.get(item_id).copied().unwrap_or(0)
    }

    // ==================== Mutations ====================

    /// Replace the current receipt and clear every selection
    ///
    /// The tip percentage carries over from the previous receipt.
    pub fn load_receipt(&mut self, receipt: Receipt) -> Option<SplitSnapshot> {
        tracing::debug!(
            receipt_id = %receipt.id,
            items = receipt.items.len(),
            "Loading receipt"
        );
        self.selection.clear();
        self.receipt = Some(receipt);
        self.snapshot()
    }

    /// Drop the receipt and its selection, keeping the tip percentage
    pub fn unload(&mut self) {
        self.receipt = None;
        self.selection.clear();
    }

    /// Binary toggle: unselected → full quantity, anything else → 0
    pub fn toggle_item_selection(&mut self, item_id: &str) -> Option<SplitSnapshot> {
        let Some(quantity) = self.item_quantity(item_id) else {
            tracing::debug!(item_id = %item_id, "Toggle ignored: unknown item or no receipt");
            return self.snapshot();
        };

        if self.selected_quantity(item_id) > 0 {
            self.selection.remove(item_id);
        } else {
            self.set_selected(item_id, quantity);
        }
        tracing::debug!(
            item_id = %item_id,
            selected = self.selected_quantity(item_id),
            "Item selection toggled"
        );
        self.snapshot()
    }

    /// Set an item's selected quantity, clamped into `[0, quantity]`
    pub fn update_item_quantity(&mut self, item_id: &str, quantity: i32) -> Option<SplitSnapshot> {
        let Some(max) = self.item_quantity(item_id) else {
            tracing::debug!(item_id = %item_id, "Quantity update ignored: unknown item or no receipt");
            return self.snapshot();
        };

        let clamped = clamp_quantity(quantity, max);
        if clamped != quantity {
            tracing::debug!(item_id = %item_id, requested = quantity, clamped, "Quantity clamped");
        }
        self.set_selected(item_id, clamped);
        self.snapshot()
    }

    /// Select one more unit of an item (stepper +)
    pub fn increment_item(&mut self, item_id: &str) -> Option<SplitSnapshot> {
        let next = self.selected_quantity(item_id).saturating_add(1);
        self.update_item_quantity(item_id, next)
    }

    /// Select one less unit of an item (stepper -)
    pub fn decrement_item(&mut self, item_id: &str) -> Option<SplitSnapshot> {
        let next = self.selected_quantity(item_id).saturating_sub(1);
        self.update_item_quantity(item_id, next)
    }

    /// Select every item at its full quantity
    pub fn select_all(&mut self) -> Option<SplitSnapshot> {
        if let Some(receipt) = &self.receipt {
            for item in receipt.items.iter().filter(|i| i.quantity > 0) {
                self.selection.insert(item.id.clone(), item.quantity);
            }
        }
        self.snapshot()
    }

    /// Deselect everything
    pub fn clear_selection(&mut self) -> Option<SplitSnapshot> {
        self.selection.clear();
        self.snapshot()
    }

    /// Replace the tip percentage
    ///
    /// Ignored while no receipt is loaded. No clamping at this layer; see
    /// [`crate::tip::clamp_tip_percentage`] for the presentation boundary.
    pub fn update_tip_percentage(&mut self, tip_percentage: Decimal) -> Option<SplitSnapshot> {
        if self.receipt.is_none() {
            tracing::debug!(tip = %tip_percentage, "Tip change ignored: no receipt loaded");
            return None;
        }
        self.tip_percentage = tip_percentage;
        tracing::debug!(tip = %tip_percentage, "Tip percentage updated");
        self.snapshot()
    }

    // ==================== Derivation ====================

    /// Synthesize the current receipt and split from the mapping
    ///
    /// Returns `None` when no receipt is loaded.
    pub fn snapshot(&self) -> Option<SplitSnapshot> {
        let receipt = self.receipt.as_ref()?;

        let items = receipt
            .items
            .iter()
            .map(|item| item.with_selected_quantity(self.selected_quantity(&item.id)))
            .collect::<Vec<_>>();
        let bill_split = BillSplit::calculate(&items, self.tip_percentage);

        Some(SplitSnapshot {
            receipt: Receipt {
                items,
                ..receipt.clone()
            },
            bill_split,
            tip_percentage: self.tip_percentage,
        })
    }

    fn item_quantity(&self, item_id: &str) -> Option<i32> {
        self.receipt.as_ref()?.item(item_id).map(|i| i.quantity)
    }

    fn set_selected(&mut self, item_id: &str, quantity: i32) {
        if quantity == 0 {
            self.selection.remove(item_id);
        } else {
            self.selection.insert(item_id.to_string(), quantity);
        }
    }
}
