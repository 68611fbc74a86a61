//! Route table and guard decision.
//!
//! Only the paths in the table activate the guard; everything else is public and never
//! triggers a session lookup. The decision is a pure function of the route class and the
//! session's role, so evaluating it twice yields the same answer.

use fhub_domain::constants::{ADMIN_HOME, CUSTOMER_HOME, LOGIN_PATH, PROVIDER_HOME, REGISTER_PATH};
use fhub_domain::role::Role;

/// How a request path is treated by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Outside the route table.
    Public,
    /// `/login` or `/register`: only for visitors without a session.
    AuthPage,
    /// A dashboard subtree reserved for one role.
    Dashboard(Role),
}

impl RouteClass {
    #[must_use]
    pub const fn is_guarded(self) -> bool {
        !matches!(self, Self::Public)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(&'static str),
}

const DASHBOARDS: [(&str, Role); 3] = [
    (ADMIN_HOME, Role::Admin),
    (PROVIDER_HOME, Role::Provider),
    (CUSTOMER_HOME, Role::Customer),
];

/// Classifies a request path. Query strings must already be stripped.
#[must_use]
pub fn classify(path: &str) -> RouteClass {
    if path == LOGIN_PATH || path == REGISTER_PATH {
        return RouteClass::AuthPage;
    }

    DASHBOARDS
        .iter()
        .find(|(prefix, _)| within(path, prefix))
        .map_or(RouteClass::Public, |&(_, role)| RouteClass::Dashboard(role))
}

/// `prefix` itself or anything below it; `/dashboardx` is not below `/dashboard`.
fn within(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix).is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// First matching rule wins:
///
/// | session | route | outcome |
/// |---|---|---|
/// | none | auth page | allow |
/// | none | dashboard | `/login` |
/// | some | auth page | `home(role)` |
/// | some | dashboard of another role | `home(role)` |
/// | otherwise | | allow |
#[must_use]
pub fn decide(route: RouteClass, role: Option<Role>) -> Decision {
    match (role, route) {
        (_, RouteClass::Public) | (None, RouteClass::AuthPage) => Decision::Allow,
        (None, RouteClass::Dashboard(_)) => Decision::Redirect(LOGIN_PATH),
        (Some(role), RouteClass::AuthPage) => Decision::Redirect(role.home()),
        (Some(role), RouteClass::Dashboard(required)) if role != required => {
            Decision::Redirect(role.home())
        },
        (Some(_), RouteClass::Dashboard(_)) => Decision::Allow,
    }
}
