use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub provider_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub address_line: String,
    pub city: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of both restaurant create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantUpsertInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address_line: String,
    pub city: String,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

const fn active_by_default() -> bool {
    true
}

impl RestaurantUpsertInput {
    /// Trims every field, drops blank optionals and checks the required ones.
    pub fn normalize(self) -> Result<Self, &'static str> {
        let trimmed = |value: Option<String>| {
            value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
        };

        let normalized = Self {
            name: self.name.trim().to_owned(),
            description: trimmed(self.description),
            phone: trimmed(self.phone),
            address_line: self.address_line.trim().to_owned(),
            city: self.city.trim().to_owned(),
            is_active: self.is_active,
        };

        if normalized.name.is_empty() {
            return Err("Restaurant name is required.");
        }
        if normalized.address_line.is_empty() {
            return Err("Address line is required.");
        }
        if normalized.city.is_empty() {
            return Err("City is required.");
        }
        Ok(normalized)
    }
}
