use crate::constants::{ADMIN_HOME, CUSTOMER_HOME, PROVIDER_HOME};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Marketplace role of an authenticated user.
///
/// Parsing ignores ASCII case, so `"admin"` and `"ADMIN"` are the same role.
/// Anything else is rejected; sessions read it through [`session_role`] instead.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Role {
    Customer,
    Provider,
    Admin,
}

impl Role {
    /// Landing page of the role's dashboard.
    #[must_use]
    pub const fn home(self) -> &'static str {
        match self {
            Self::Customer => CUSTOMER_HOME,
            Self::Provider => PROVIDER_HOME,
            Self::Admin => ADMIN_HOME,
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_str(raw.trim())
            .map_err(|_| serde::de::Error::custom(format!("unknown role '{raw}'")))
    }
}

/// Role of a signed-in user. Strings outside the three roles land on the customer
/// dashboard, the home of every role that is neither ADMIN nor PROVIDER.
pub fn session_role<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| Role::from_str(raw.trim()).ok()).unwrap_or(Role::Customer))
}
