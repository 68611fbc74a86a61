use crate::models::menu::CuisineType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Order lifecycle as reported by the backend. Transitions are enforced there, not here.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Statuses a provider may pick for one of their orders.
    pub const PROVIDER_ALLOWED: [Self; 5] =
        [Self::Confirmed, Self::Preparing, Self::OutForDelivery, Self::Delivered, Self::Cancelled];

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    #[must_use]
    pub fn is_provider_allowed(self) -> bool {
        Self::PROVIDER_ALLOWED.contains(&self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomer {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRestaurant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderMenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cuisine: Option<CuisineType>,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub price_cents: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub total_cents: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub delivery_address_snapshot: Option<Value>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<OrderCustomer>,
    pub restaurant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<OrderRestaurant>,
    pub menu_item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_item: Option<OrderMenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub label: String,
    pub city: String,
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutInput {
    pub delivery_address_snapshot: DeliveryAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CheckoutInput {
    /// Label, city and first address line are required.
    pub fn validate(self) -> Result<Self, &'static str> {
        let address = &self.delivery_address_snapshot;
        if [&address.label, &address.city, &address.line1].iter().any(|v| v.trim().is_empty()) {
            return Err("Label, city and address line are required.");
        }
        Ok(self)
    }
}

/// One row of the admin orders table, with ids resolved to display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderRow {
    pub id: String,
    pub created_at: String,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub customer_name: String,
    pub restaurant_name: String,
    pub menu_item_name: String,
}
