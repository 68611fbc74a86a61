use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub menu_item_id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub user: ReviewUser,
}

/// Create-or-update body; one review per user and menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub menu_item_id: String,
    pub rating: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ReviewInput {
    pub const MAX_RATING: i64 = 5;

    pub fn validate(mut self) -> Result<Self, &'static str> {
        if !(1..=Self::MAX_RATING).contains(&self.rating) {
            return Err("Rating must be between 1 and 5.");
        }
        self.comment = self.comment.map(|c| c.trim().to_owned()).filter(|c| !c.is_empty());
        Ok(self)
    }
}
