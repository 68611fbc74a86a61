use fhub_identity::load_profile;
use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::constants::ACCOUNT_SUSPENDED;
use fhub_kernel::domain::models::menu::{CreateMenuItemInput, MenuItem, UpdateMenuItemInput};
use fhub_kernel::domain::models::order::{Order, OrderStatus};
use fhub_kernel::domain::models::restaurant::{Restaurant, RestaurantUpsertInput};
use fhub_kernel::domain::models::user::UserStatus;
use fhub_kernel::domain::session::Session;
use fhub_kernel::server::reply::{BackendResultExt, ServiceError};
use futures_util::future::join;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOverview {
    pub restaurant: Option<Restaurant>,
    pub menu_size: usize,
    pub orders: Vec<StatusCount>,
}

/// Orders per status, every status listed even when zero.
#[must_use]
pub fn count_by_status(orders: &[Order]) -> Vec<StatusCount> {
    OrderStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: orders.iter().filter(|order| order.status == status).count(),
        })
        .collect()
}

/// Decodes the row a mutation echoed back, if it has the expected shape.
fn server_copy<S: DeserializeOwned>(reply: Option<Value>) -> Option<S> {
    reply.and_then(|value| serde_json::from_value(value).ok())
}

/// Provider-side operations, on behalf of the caller's cookie.
#[derive(Debug, Clone)]
pub struct ProviderService {
    backend: BackendClient,
}

impl ProviderService {
    #[must_use]
    pub const fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// Refuses catalog changes from suspended providers.
    ///
    /// The profile's status wins over the session's; a failed profile lookup falls back to
    /// the session.
    pub async fn ensure_active(&self, session: &Session, cookie: Option<&str>) -> Result<(), ServiceError> {
        let status = match load_profile(&self.backend, cookie).await {
            Ok(me) => me.status.or(session.user.status),
            Err(error) => {
                debug!(%error, "Profile unavailable, using session status");
                session.user.status
            },
        };

        if status == Some(UserStatus::Suspended) {
            return Err(ServiceError::forbidden(ACCOUNT_SUSPENDED));
        }
        Ok(())
    }

    pub async fn overview(&self, session: &Session, cookie: Option<&str>) -> Result<ProviderOverview, ServiceError> {
        let restaurant = self.my_restaurant(session, cookie).await?;

        let (menu, orders) = match &restaurant {
            Some(restaurant) => {
                let (menu, orders) = join(self.menu(&restaurant.id, cookie), self.orders(cookie)).await;
                (menu?, orders?)
            },
            None => (Vec::new(), self.orders(cookie).await?),
        };

        Ok(ProviderOverview { restaurant, menu_size: menu.len(), orders: count_by_status(&orders) })
    }

    /// The restaurant owned by the signed-in provider, if one exists yet.
    pub async fn my_restaurant(
        &self,
        session: &Session,
        cookie: Option<&str>,
    ) -> Result<Option<Restaurant>, ServiceError> {
        let restaurants: Vec<Restaurant> = self
            .backend
            .get(["restaurants"])
            .cookie(cookie)
            .fetch()
            .await
            .or_fallback("Failed to load restaurant")?;

        Ok(restaurants.into_iter().find(|restaurant| restaurant.provider_id == session.user.id))
    }

    pub async fn create_restaurant(
        &self,
        session: &Session,
        cookie: Option<&str>,
        input: RestaurantUpsertInput,
    ) -> Result<Value, ServiceError> {
        let input = input.normalize().map_err(ServiceError::bad_request)?;
        self.ensure_active(session, cookie).await?;
        self.backend
            .post(["restaurants"])
            .cookie(cookie)
            .json(&input)
            .fetch()
            .await
            .or_fallback("Failed to create restaurant")
    }

    pub async fn update_restaurant(
        &self,
        session: &Session,
        cookie: Option<&str>,
        id: &str,
        input: RestaurantUpsertInput,
    ) -> Result<Value, ServiceError> {
        let input = input.normalize().map_err(ServiceError::bad_request)?;
        self.ensure_active(session, cookie).await?;
        self.backend
            .patch(["restaurants", id])
            .cookie(cookie)
            .json(&input)
            .fetch()
            .await
            .or_fallback("Failed to update restaurant")
    }

    pub async fn menu(&self, restaurant_id: &str, cookie: Option<&str>) -> Result<Vec<MenuItem>, ServiceError> {
        let items: Option<Vec<MenuItem>> = self
            .backend
            .get(["menu-items", "restaurant", restaurant_id])
            .cookie(cookie)
            .fetch()
            .await
            .or_fallback("Failed to load menu items")?;
        Ok(items.unwrap_or_default())
    }

    /// Menu of the provider's own restaurant; empty before a restaurant exists.
    pub async fn my_menu(&self, session: &Session, cookie: Option<&str>) -> Result<Vec<MenuItem>, ServiceError> {
        match self.my_restaurant(session, cookie).await? {
            Some(restaurant) => self.menu(&restaurant.id, cookie).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn create_menu_item(
        &self,
        session: &Session,
        cookie: Option<&str>,
        input: CreateMenuItemInput,
    ) -> Result<Value, ServiceError> {
        let input = input.validate().map_err(ServiceError::bad_request)?;
        self.ensure_active(session, cookie).await?;
        self.backend
            .post(["menu-items"])
            .cookie(cookie)
            .json(&input)
            .fetch()
            .await
            .or_fallback("Failed to create item")
    }

    pub async fn menu_item(&self, id: &str, cookie: Option<&str>) -> Result<Option<MenuItem>, ServiceError> {
        self.backend.get(["menu-items", id]).cookie(cookie).fetch().await.or_fallback("Failed to load item")
    }

    pub async fn update_menu_item(
        &self,
        session: &Session,
        cookie: Option<&str>,
        id: &str,
        input: &UpdateMenuItemInput,
    ) -> Result<Value, ServiceError> {
        self.ensure_active(session, cookie).await?;
        self.backend
            .patch(["menu-items", id])
            .cookie(cookie)
            .json(input)
            .fetch()
            .await
            .or_fallback("Failed to update item")
    }

    /// Availability toggle; returns the backend's copy of the item when it sent one.
    pub async fn set_availability(
        &self,
        session: &Session,
        cookie: Option<&str>,
        id: &str,
        is_available: bool,
    ) -> Result<Option<MenuItem>, ServiceError> {
        let patch = UpdateMenuItemInput { is_available: Some(is_available), ..Default::default() };
        self.update_menu_item(session, cookie, id, &patch).await.map(|reply| server_copy(Some(reply)))
    }

    pub async fn delete_menu_item(
        &self,
        session: &Session,
        cookie: Option<&str>,
        id: &str,
    ) -> Result<(), ServiceError> {
        self.ensure_active(session, cookie).await?;
        self.backend
            .delete(["menu-items", id])
            .cookie(cookie)
            .send_checked()
            .await
            .or_fallback("Failed to delete item")
    }

    pub async fn orders(&self, cookie: Option<&str>) -> Result<Vec<Order>, ServiceError> {
        let orders: Option<Vec<Order>> = self
            .backend
            .get(["orders", "provider"])
            .cookie(cookie)
            .fetch()
            .await
            .or_fallback("Failed to load orders")?;
        Ok(orders.unwrap_or_default())
    }

    /// Moves one of the provider's orders forward. Terminal orders and statuses a
    /// provider may not pick are refused before any call is made.
    pub async fn set_order_status(
        &self,
        cookie: Option<&str>,
        order: &Order,
        status: OrderStatus,
    ) -> Result<Option<Order>, ServiceError> {
        if order.status.is_terminal() {
            return Err(ServiceError::bad_request("This order can no longer change status."));
        }
        if !status.is_provider_allowed() {
            return Err(ServiceError::bad_request("Providers cannot set this status."));
        }

        let reply: Option<Value> = self
            .backend
            .patch(["orders", order.id.as_str(), "status"])
            .cookie(cookie)
            .json(&json!({ "status": status }))
            .fetch()
            .await
            .or_fallback("Failed to update order status")?;
        Ok(server_copy(reply))
    }
}
