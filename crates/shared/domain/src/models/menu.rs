use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CuisineType {
    Meat,
    Fish,
    Veg,
    Vegan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub is_available: bool,
    pub cuisine: CuisineType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl MenuItem {
    /// Stand-in for a cart line whose item could not be loaded.
    #[must_use]
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            restaurant_id: String::new(),
            name: "Item not found".to_owned(),
            description: None,
            price_cents: 0,
            image_url: None,
            is_available: false,
            cuisine: CuisineType::Meat,
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default = "available_by_default")]
    pub is_available: bool,
    pub cuisine: CuisineType,
}

const fn available_by_default() -> bool {
    true
}

impl CreateMenuItemInput {
    /// Trims the name and rejects items that cannot be listed.
    pub fn validate(mut self) -> Result<Self, &'static str> {
        self.name = self.name.trim().to_owned();
        if self.name.is_empty() {
            return Err("Name is required.");
        }
        if self.price_cents <= 0 {
            return Err("Price must be greater than zero.");
        }
        Ok(self)
    }
}

/// Partial update; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<CuisineType>,
}

/// `GET /menu-items` filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<CuisineType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<i64>,
}
