use crate::role::Role;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub title: &'static str,
    pub url: &'static str,
}

/// A titled group of sidebar links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavSection {
    pub title: &'static str,
    pub items: &'static [NavItem],
}

const HOME: NavItem = NavItem { title: "Home", url: "/" };

const CUSTOMER: &[NavSection] = &[NavSection {
    title: "Your Dashboard",
    items: &[
        NavItem { title: "My Profile", url: "/dashboard/profile" },
        NavItem { title: "Cart", url: "/dashboard/cart" },
        NavItem { title: "My Orders", url: "/dashboard/order" },
        HOME,
    ],
}];

const PROVIDER: &[NavSection] = &[NavSection {
    title: "Your Dashboard",
    items: &[
        NavItem { title: "My Profile", url: "/provider-dashboard/profile" },
        NavItem { title: "My Restaurant", url: "/provider-dashboard/restaurant" },
        NavItem { title: "Menu", url: "/provider-dashboard/menu-items" },
        NavItem { title: "Orders", url: "/provider-dashboard/order" },
        HOME,
    ],
}];

const ADMIN: &[NavSection] = &[NavSection {
    title: "Your Dashboard",
    items: &[
        NavItem { title: "My Profile", url: "/admin-dashboard/profile" },
        NavItem { title: "All Users", url: "/admin-dashboard/users" },
        NavItem { title: "All Orders", url: "/admin-dashboard/order" },
        HOME,
    ],
}];

/// Sidebar sections shown to `role`.
#[must_use]
pub const fn sections_for(role: Role) -> &'static [NavSection] {
    match role {
        Role::Customer => CUSTOMER,
        Role::Provider => PROVIDER,
        Role::Admin => ADMIN,
    }
}
