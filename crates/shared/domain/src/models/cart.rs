use crate::models::menu::MenuItem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub menu_item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// Body of `POST /cart/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartInput {
    pub menu_item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

/// Cart line joined with its menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub menu_item_id: String,
    pub quantity: u32,
    pub menu_item: MenuItem,
}

impl CartLine {
    /// Saturates instead of overflowing on prices the backend reports.
    #[must_use]
    pub fn subtotal_cents(&self) -> i64 {
        self.menu_item.price_cents.saturating_mul(i64::from(self.quantity))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total_cents: i64,
}

impl CartView {
    #[must_use]
    pub fn new(lines: Vec<CartLine>) -> Self {
        let total_cents =
            lines.iter().map(CartLine::subtotal_cents).fold(0_i64, i64::saturating_add);
        Self { lines, total_cents }
    }
}
