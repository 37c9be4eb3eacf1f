//! Plain-text summary of the user's share, for messaging apps

use shared::money::{format_money, format_percentage};

use crate::engine::SplitSnapshot;

impl SplitSnapshot {
    /// Render the selection and totals as shareable text
    ///
    /// ```text
    /// DivUp - Bill split
    /// Bar do Zé
    /// 12/03/2025
    ///
    /// My items:
    /// - Burger - 15.00
    /// - Soda (1x) - 5.00
    ///
    /// Subtotal: 20.00
    /// Tip (10%): 2.00
    /// TOTAL: 22.00
    /// ```
    pub fn share_text(&self) -> String {
        let split = &self.bill_split;
        let mut text = String::from("DivUp - Bill split\n");

        for line in [&self.receipt.establishment_name, &self.receipt.date]
            .into_iter()
            .flatten()
        {
            text.push_str(line);
            text.push('\n');
        }

        text.push_str("\nMy items:\n");
        for item in &split.selected_items {
            let count = if item.selected_quantity > 1 || !item.is_fully_selected() {
                format!(" ({}x)", item.selected_quantity)
            } else {
                String::new()
            };
            text.push_str(&format!(
                "- {}{} - {}\n",
                item.name,
                count,
                format_money(item.selected_price())
            ));
        }

        text.push_str(&format!(
            "\nSubtotal: {}\nTip ({}%): {}\nTOTAL: {}",
            format_money(split.items_subtotal),
            format_percentage(split.tip_percentage),
            format_money(split.tip_amount),
            format_money(split.total)
        ));
        text
    }
}
