//! Paths, tags and user-facing messages shared across slices.

// --- Gateway routes ---
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const CUSTOMER_HOME: &str = "/dashboard";
pub const PROVIDER_HOME: &str = "/provider-dashboard";
pub const ADMIN_HOME: &str = "/admin-dashboard";

// --- Auth service ---
pub const SESSION_PATH: &str = "get-session";

// --- OpenAPI tags ---
pub const SYSTEM_TAG: &str = "System";
pub const IDENTITY_TAG: &str = "Identity";
pub const CATALOG_TAG: &str = "Catalog";
pub const ORDERING_TAG: &str = "Ordering";
pub const PROVIDER_TAG: &str = "Provider";
pub const ADMIN_TAG: &str = "Admin";

// --- Messages ---
pub const GENERIC_FAILURE: &str = "Something went wrong";
pub const AUTH_REQUIRED: &str = "Authentication required";
pub const ACCOUNT_SUSPENDED: &str = "Your account is suspended.";
