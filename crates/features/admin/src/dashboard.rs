//! Admin dashboard figures, computed from the raw lists the backend returns.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use std::cmp::Reverse;
use fhub_kernel::domain::models::order::Order;
use fhub_kernel::domain::models::restaurant::Restaurant;
use fhub_kernel::domain::models::user::AdminUser;
use fhub_kernel::domain::role::Role;
use serde::Serialize;

const SERIES_DAYS: u64 = 14;
const RECENT_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub providers: usize,
    pub customers: usize,
    pub restaurants: usize,
    pub orders: usize,
    pub approved_users: usize,
    pub unapproved_users: usize,
}

impl AdminStats {
    #[must_use]
    pub fn collect(users: &[AdminUser], restaurants: &[Restaurant], orders: &[Order]) -> Self {
        let with_role = |role: Role| users.iter().filter(|user| user.role == role).count();
        let approved_users = users.iter().filter(|user| user.is_approved).count();

        Self {
            providers: with_role(Role::Provider),
            customers: with_role(Role::Customer),
            restaurants: restaurants.len(),
            orders: orders.len(),
            approved_users,
            unapproved_users: users.len() - approved_users,
        }
    }
}

/// Items created on one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub stats: AdminStats,
    pub users_series: Vec<DayCount>,
    pub restaurants_series: Vec<DayCount>,
    pub orders_series: Vec<DayCount>,
    pub recent_users: Vec<AdminUser>,
    pub recent_restaurants: Vec<Restaurant>,
    pub recent_orders: Vec<Order>,
    /// First failure among the three source lists; the figures still cover the others.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AdminDashboard {
    #[must_use]
    pub fn build(
        users: Vec<AdminUser>,
        restaurants: Vec<Restaurant>,
        orders: Vec<Order>,
        today: NaiveDate,
    ) -> Self {
        let users_series =
            daily_series(users.iter().map(|user| user.created_at.as_deref()), today, SERIES_DAYS);
        let restaurants_series = daily_series(
            restaurants.iter().map(|restaurant| Some(restaurant.created_at.as_str())),
            today,
            SERIES_DAYS,
        );
        let orders_series =
            daily_series(orders.iter().map(|order| Some(order.created_at.as_str())), today, SERIES_DAYS);

        Self {
            stats: AdminStats::collect(&users, &restaurants, &orders),
            users_series,
            restaurants_series,
            orders_series,
            recent_users: most_recent(users, |user| user.created_at.as_deref()),
            recent_restaurants: most_recent(restaurants, |restaurant| Some(restaurant.created_at.as_str())),
            recent_orders: most_recent(orders, |order| Some(order.created_at.as_str())),
            error: None,
        }
    }
}

/// Calendar day (UTC) of an RFC 3339 timestamp, or of a bare `YYYY-MM-DD` date.
#[must_use]
pub fn day_of(timestamp: &str) -> Option<NaiveDate> {
    let timestamp = timestamp.trim();
    DateTime::parse_from_rfc3339(timestamp)
        .map(|moment| moment.with_timezone(&Utc).date_naive())
        .ok()
        .or_else(|| timestamp.get(..10)?.parse().ok())
}

/// Instant of a timestamp in UTC; a bare date counts as its midnight.
fn moment_of(timestamp: &str) -> Option<DateTime<Utc>> {
    let timestamp = timestamp.trim();
    DateTime::parse_from_rfc3339(timestamp)
        .map(|moment| moment.with_timezone(&Utc))
        .ok()
        .or_else(|| day_of(timestamp).map(|day| day.and_time(NaiveTime::MIN).and_utc()))
}

/// Per-day counts over the `days` days ending with `today`, zero-filled, oldest first.
///
/// Timestamps outside the window or that cannot be parsed are not counted.
#[must_use]
pub fn daily_series<'a>(
    created: impl IntoIterator<Item = Option<&'a str>>,
    today: NaiveDate,
    days: u64,
) -> Vec<DayCount> {
    let Some(start) = today.checked_sub_days(Days::new(days.saturating_sub(1))) else {
        return Vec::new();
    };

    let mut counts = vec![0_usize; usize::try_from(days).unwrap_or_default()];
    for day in created.into_iter().flatten().filter_map(day_of) {
        let Ok(offset) = usize::try_from((day - start).num_days()) else {
            continue;
        };
        if let Some(slot) = counts.get_mut(offset) {
            *slot += 1;
        }
    }

    start
        .iter_days()
        .zip(counts)
        .map(|(date, count)| DayCount { date: date.to_string(), count })
        .collect()
}

/// The newest `RECENT_LIMIT` items by creation time; undated items go last.
fn most_recent<T>(mut items: Vec<T>, created_at: impl Fn(&T) -> Option<&str>) -> Vec<T> {
    items.sort_by_cached_key(|item| Reverse(created_at(item).and_then(moment_of)));
    items.truncate(RECENT_LIMIT);
    items
}
