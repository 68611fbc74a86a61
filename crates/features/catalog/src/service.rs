use futures_util::future::join;
use fhub_kernel::backend::BackendClient;
use fhub_kernel::domain::models::cart::AddToCartInput;
use fhub_kernel::domain::models::menu::{MenuFilter, MenuItem};
use fhub_kernel::domain::models::restaurant::Restaurant;
use fhub_kernel::domain::models::review::{Review, ReviewInput};
use fhub_kernel::domain::role::Role;
use fhub_kernel::domain::session::Session;
use fhub_kernel::server::reply::{BackendResultExt, ServiceError};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantPage {
    pub restaurant: Restaurant,
    pub menu_items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPage {
    pub item: MenuItem,
    pub reviews: Vec<Review>,
    /// Only customers may order and review.
    pub is_customer: bool,
    /// The viewing customer's own review, if any.
    pub my_review: Option<Review>,
}

/// Public storefront reads and the customer actions launched from it.
#[derive(Debug, Clone)]
pub struct CatalogService {
    backend: BackendClient,
}

impl CatalogService {
    #[must_use]
    pub const fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    pub async fn restaurants(&self) -> Result<Vec<Restaurant>, ServiceError> {
        let restaurants: Option<Vec<Restaurant>> =
            self.backend.get(["restaurants"]).fetch().await.or_fallback("Failed to load restaurants")?;
        Ok(restaurants.unwrap_or_default())
    }

    pub async fn restaurant_page(&self, id: &str) -> Result<RestaurantPage, ServiceError> {
        let (restaurant, menu) = join(
            self.backend.get(["restaurants", id]).fetch::<Option<Restaurant>>(),
            self.backend.get(["menu-items", "restaurant", id]).fetch::<Option<Vec<MenuItem>>>(),
        )
        .await;

        let restaurant = restaurant
            .or_fallback("Failed to load restaurant")?
            .ok_or_else(|| ServiceError::not_found("Restaurant not found."))?;
        let menu_items = menu
            .unwrap_or_else(|error| {
                warn!(restaurant_id = id, %error, "Menu of restaurant unavailable");
                None
            })
            .unwrap_or_default();

        Ok(RestaurantPage { restaurant, menu_items })
    }

    pub async fn menu_items(&self, filter: &MenuFilter) -> Result<Vec<MenuItem>, ServiceError> {
        let items: Option<Vec<MenuItem>> = self
            .backend
            .get(["menu-items"])
            .query(filter)
            .fetch()
            .await
            .or_fallback("Failed to load menu items")?;
        Ok(items.unwrap_or_default())
    }

    /// Item, its reviews and the viewer's own review. Missing reviews read as none.
    pub async fn menu_item_page(
        &self,
        id: &str,
        viewer: Option<&Session>,
    ) -> Result<MenuItemPage, ServiceError> {
        let (item, reviews) = join(
            self.backend.get(["menu-items", id]).fetch::<Option<MenuItem>>(),
            self.backend.get(["reviews", "menu-item", id]).fetch::<Vec<Review>>(),
        )
        .await;

        let item = item
            .or_fallback("Failed to load item")?
            .ok_or_else(|| ServiceError::not_found("Menu item not found."))?;
        let reviews = reviews.unwrap_or_else(|error| {
            warn!(menu_item_id = id, %error, "Reviews unavailable");
            Vec::new()
        });

        let customer = viewer.filter(|session| session.role() == Role::Customer);
        let my_review = customer.and_then(|session| {
            reviews.iter().find(|review| review.user_id == session.user.id).cloned()
        });

        Ok(MenuItemPage { item, reviews, is_customer: customer.is_some(), my_review })
    }

    pub async fn add_to_cart(
        &self,
        cookie: Option<&str>,
        input: &AddToCartInput,
    ) -> Result<(), ServiceError> {
        self.backend
            .post(["cart", "add"])
            .cookie(cookie)
            .json(input)
            .send_checked()
            .await
            .or_fallback("Failed to add to cart.")
    }

    pub async fn save_review(
        &self,
        cookie: Option<&str>,
        input: ReviewInput,
    ) -> Result<(), ServiceError> {
        let input = input.validate().map_err(ServiceError::bad_request)?;
        self.backend
            .post(["reviews"])
            .cookie(cookie)
            .json(&input)
            .send_checked()
            .await
            .or_fallback("Failed to submit review.")
    }

    pub async fn delete_review(
        &self,
        cookie: Option<&str>,
        review_id: &str,
    ) -> Result<(), ServiceError> {
        self.backend
            .delete(["reviews", review_id])
            .cookie(cookie)
            .send_checked()
            .await
            .or_fallback("Failed to delete review.")
    }
}
