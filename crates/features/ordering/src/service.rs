use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::models::cart::{Cart, CartItem, CartLine, CartView};
use fhub_kernel::domain::models::menu::MenuItem;
use fhub_kernel::domain::models::order::{CheckoutInput, Order};
use fhub_kernel::server::reply::{BackendResultExt, ServiceError};
use futures_util::future::join_all;
use serde_json::Value;
use tracing::warn;

/// Checkout result: the backend's confirmation (if any) and the created order payload.
#[derive(Debug, Clone)]
pub struct Placed {
    pub message: Option<String>,
    pub order: Value,
}

/// Customer cart and order operations, always on behalf of the caller's cookie.
#[derive(Debug, Clone)]
pub struct OrderingService {
    backend: BackendClient,
}

impl OrderingService {
    #[must_use]
    pub const fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// Cart lines joined with their menu items, fetched concurrently.
    ///
    /// A line whose item cannot be loaded keeps its place with a placeholder item.
    pub async fn cart(&self, cookie: Option<&str>) -> Result<CartView, ServiceError> {
        let cart: Option<Cart> =
            self.backend.get(["cart"]).cookie(cookie).fetch().await.or_fallback("Failed to load cart.")?;
        let items = cart.unwrap_or_default().items;

        let lines = join_all(items.into_iter().map(|item| self.hydrate(item))).await;
        Ok(CartView::new(lines))
    }

    async fn hydrate(&self, item: CartItem) -> CartLine {
        let menu_item = match self
            .backend
            .get(["menu-items", item.menu_item_id.as_str()])
            .fetch::<Option<MenuItem>>()
            .await
        {
            Ok(Some(menu_item)) => menu_item,
            Ok(None) => MenuItem::placeholder(item.menu_item_id.as_str()),
            Err(error) => {
                warn!(menu_item_id = %item.menu_item_id, %error, "Cart line item unavailable");
                MenuItem::placeholder(item.menu_item_id.as_str())
            },
        };

        CartLine { quantity: item.quantity.unwrap_or(1), menu_item_id: item.menu_item_id, menu_item }
    }

    pub async fn remove_line(&self, cookie: Option<&str>, menu_item_id: &str) -> Result<(), ServiceError> {
        self.backend
            .delete(["cart", "item", menu_item_id])
            .cookie(cookie)
            .send_checked()
            .await
            .or_fallback("Failed to remove item.")
    }

    pub async fn clear(&self, cookie: Option<&str>) -> Result<(), ServiceError> {
        self.backend
            .delete(["cart", "clear"])
            .cookie(cookie)
            .send_checked()
            .await
            .or_fallback("Failed to clear cart.")
    }

    pub async fn checkout(&self, cookie: Option<&str>, input: CheckoutInput) -> Result<Placed, ServiceError> {
        let input = input.validate().map_err(ServiceError::bad_request)?;
        let envelope = self
            .backend
            .post(["orders", "checkout"])
            .cookie(cookie)
            .json(&input)
            .fetch_envelope::<Value>()
            .await
            .or_fallback("Failed to checkout.")?;

        Ok(Placed { message: envelope.message, order: envelope.data })
    }

    pub async fn my_orders(&self, cookie: Option<&str>) -> Result<Vec<Order>, ServiceError> {
        let orders: Option<Vec<Order>> =
            self.backend.get(["orders", "me"]).cookie(cookie).fetch().await.or_fallback("Failed to load orders.")?;
        Ok(orders.unwrap_or_default())
    }
}
