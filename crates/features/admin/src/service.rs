use crate::dashboard::AdminDashboard;
use chrono::Utc;
use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::models::order::{AdminOrderRow, Order};
use fhub_kernel::domain::models::restaurant::Restaurant;
use fhub_kernel::domain::models::user::{AdminUser, ApprovalChange, StatusChange};
use fhub_kernel::server::reply::{BackendResultExt, ServiceError};
use futures_util::future::{join, join_all, join3};
use fxhash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Borrow;
use std::hash::Hash;
use tracing::warn;

const UNKNOWN_CUSTOMER: &str = "Unknown customer";
const UNKNOWN_RESTAURANT: &str = "Unknown restaurant";
const UNKNOWN_ITEM: &str = "Unknown item";

/// The only part of a looked-up restaurant or menu item the orders table shows.
#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

/// Platform-wide reads and user moderation, on behalf of the admin's cookie.
#[derive(Debug, Clone)]
pub struct AdminService {
    backend: BackendClient,
}

impl AdminService {
    #[must_use]
    pub const fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    async fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        cookie: Option<&str>,
        fallback: &str,
    ) -> Result<Vec<T>, ServiceError> {
        let items: Option<Vec<T>> =
            self.backend.get([resource]).cookie(cookie).fetch().await.or_fallback(fallback)?;
        Ok(items.unwrap_or_default())
    }

    pub async fn users(&self, cookie: Option<&str>) -> Result<Vec<AdminUser>, ServiceError> {
        self.list("users", cookie, "Failed to load users").await
    }

    /// Users, restaurants and orders are loaded concurrently. A list that fails to load
    /// counts as empty and its message is reported alongside the figures.
    pub async fn dashboard(&self, cookie: Option<&str>) -> AdminDashboard {
        let (users, restaurants, orders) = join3(
            self.users(cookie),
            self.list::<Restaurant>("restaurants", cookie, "Failed to load restaurants"),
            self.list::<Order>("orders", cookie, "Failed to load orders"),
        )
        .await;

        let error = [users.as_ref().err(), restaurants.as_ref().err(), orders.as_ref().err()]
            .into_iter()
            .flatten()
            .next()
            .map(|error| error.message.clone());

        let mut dashboard = AdminDashboard::build(
            users.unwrap_or_default(),
            restaurants.unwrap_or_default(),
            orders.unwrap_or_default(),
            Utc::now().date_naive(),
        );
        dashboard.error = error;
        dashboard
    }

    pub async fn set_status(
        &self,
        cookie: Option<&str>,
        id: &str,
        change: StatusChange,
    ) -> Result<(), ServiceError> {
        self.backend
            .patch(["users", id, "status"])
            .cookie(cookie)
            .json(&change)
            .send_checked()
            .await
            .or_fallback("Failed to update status")
    }

    pub async fn set_approval(
        &self,
        cookie: Option<&str>,
        id: &str,
        change: ApprovalChange,
    ) -> Result<(), ServiceError> {
        self.backend
            .patch(["users", id, "approval"])
            .cookie(cookie)
            .json(&change)
            .send_checked()
            .await
            .or_fallback("Failed to update approval")
    }

    /// Every order with its customer, restaurant and item resolved to display names.
    ///
    /// Only the order list is required. Each distinct restaurant and menu item is looked up
    /// once, concurrently; failed lookups show as unknown.
    pub async fn orders_table(&self, cookie: Option<&str>) -> Result<Vec<AdminOrderRow>, ServiceError> {
        let (orders, users) = join(
            self.list::<Order>("orders", cookie, "Failed to load orders"),
            self.users(cookie),
        )
        .await;
        let orders = orders?;

        let customers: FxHashMap<String, String> = match users {
            Ok(users) => users.into_iter().map(|user| (user.id, user.name)).collect(),
            Err(error) => {
                warn!(%error, "Customer names unavailable");
                FxHashMap::default()
            },
        };

        let restaurant_ids = distinct(orders.iter().map(|order| order.restaurant_id.as_str()));
        let menu_item_ids = distinct(orders.iter().map(|order| order.menu_item_id.as_str()));

        let (restaurants, menu_items) = join(
            join_all(restaurant_ids.into_iter().map(|id| self.name_of("restaurants", id, cookie))),
            join_all(menu_item_ids.into_iter().map(|id| self.name_of("menu-items", id, cookie))),
        )
        .await;
        let restaurants: FxHashMap<&str, String> = restaurants.into_iter().flatten().collect();
        let menu_items: FxHashMap<&str, String> = menu_items.into_iter().flatten().collect();

        Ok(orders
            .iter()
            .map(|order| AdminOrderRow {
                id: order.id.clone(),
                created_at: order.created_at.clone(),
                status: order.status,
                total_cents: order.total_cents,
                customer_name: name_or(&customers, &order.customer_id, UNKNOWN_CUSTOMER),
                restaurant_name: name_or(&restaurants, &order.restaurant_id, UNKNOWN_RESTAURANT),
                menu_item_name: name_or(&menu_items, &order.menu_item_id, UNKNOWN_ITEM),
            })
            .collect())
    }

    async fn name_of<'a>(
        &self,
        resource: &str,
        id: &'a str,
        cookie: Option<&str>,
    ) -> Option<(&'a str, String)> {
        match self.backend.get([resource, id]).cookie(cookie).fetch::<Option<Named>>().await {
            Ok(named) => named.map(|named| (id, named.name)),
            Err(error) => {
                warn!(resource, id, %error, "Name lookup failed");
                None
            },
        }
    }
}

fn name_or<K: Borrow<str> + Eq + Hash>(names: &FxHashMap<K, String>, id: &str, unknown: &str) -> String {
    names.get(id).cloned().unwrap_or_else(|| unknown.to_owned())
}

/// Distinct ids, in order of first appearance.
fn distinct<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = FxHashSet::default();
    ids.filter(|id| seen.insert(*id)).collect()
}
