mod fixtures;

use axum::http::StatusCode;
use axum::http::header::LOCATION;
use fixtures::{gateway, get_with, json_body, send, spawn_stub};

fn location(headers: &axum::http::HeaderMap) -> &str {
    headers.get(LOCATION).and_then(|value| value.to_str().ok()).unwrap_or_default()
}

#[tokio::test]
async fn public_paths_bypass_the_guard() {
    let stub = spawn_stub().await;
    let router = gateway(stub.addr);

    let (status, _, body) = send(&router, get_with("/some/public/page", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "anonymous");
    assert_eq!(stub.session_hits(), 0);
}

#[tokio::test]
async fn anonymous_visitors_are_sent_to_login() {
    let stub = spawn_stub().await;
    let router = gateway(stub.addr);

    for path in ["/dashboard", "/dashboard/cart", "/admin-dashboard/users", "/provider-dashboard/order"] {
        let (status, headers, body) = send(&router, get_with(path, None)).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(location(&headers), "/login", "{path}");
        assert!(body.is_empty());
    }
}

#[tokio::test]
async fn auth_pages_are_open_to_anonymous_visitors() {
    let stub = spawn_stub().await;
    let router = gateway(stub.addr);

    let (status, _, body) = send(&router, get_with("/login", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["action"], "/api/auth/sign-in/email");

    let (status, _, body) = send(&router, get_with("/register", None)).await;
    assert_eq!(status, StatusCode::OK);
    let page = json_body(&body);
    assert_eq!(page["roles"], serde_json::json!(["CUSTOMER", "PROVIDER"]));
    assert_eq!(page["businessNameRequiredFor"], "PROVIDER");
}

#[tokio::test]
async fn signed_in_users_leave_auth_pages_for_their_home() {
    let stub = spawn_stub().await;
    let router = gateway(stub.addr);

    let cases = [
        ("/login", "session=customer", "/dashboard"),
        ("/register", "session=provider", "/provider-dashboard"),
        ("/login", "session=admin", "/admin-dashboard"),
    ];
    for (path, cookie, home) in cases {
        let (status, headers, _) = send(&router, get_with(path, Some(cookie))).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&headers), home);
    }
}

#[tokio::test]
async fn foreign_dashboards_redirect_to_the_role_home() {
    let stub = spawn_stub().await;
    let router = gateway(stub.addr);

    let cases = [
        ("/admin-dashboard/users", "session=provider", "/provider-dashboard"),
        ("/provider-dashboard/x", "session=admin", "/admin-dashboard"),
        ("/dashboard/x", "session=provider", "/provider-dashboard"),
        ("/admin-dashboard/x", "session=customer", "/dashboard"),
        ("/provider-dashboard/x", "session=customer", "/dashboard"),
    ];
    for (path, cookie, home) in cases {
        let (status, headers, _) = send(&router, get_with(path, Some(cookie))).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(location(&headers), home, "{path}");
    }
}

#[tokio::test]
async fn own_dashboard_reuses_the_guard_context() {
    let stub = spawn_stub().await;
    let router = gateway(stub.addr);

    let (status, _, body) = send(&router, get_with("/admin-dashboard/x", Some("session=admin"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ADMIN");
    assert_eq!(stub.session_hits(), 1);
}

#[tokio::test]
async fn indeterminate_sessions_fail_closed() {
    let stub = spawn_stub().await;
    let router = gateway(stub.addr);

    for cookie in ["session=broken", "session=slow"] {
        let (status, headers, _) = send(&router, get_with("/dashboard/cart", Some(cookie))).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT, "{cookie}");
        assert_eq!(location(&headers), "/login", "{cookie}");
    }
}

#[tokio::test]
async fn unrecognized_roles_are_sent_to_the_customer_dashboard() {
    let stub = spawn_stub().await;
    let router = gateway(stub.addr);

    for path in ["/admin-dashboard/x", "/provider-dashboard/x", "/login", "/register"] {
        let (status, headers, _) = send(&router, get_with(path, Some("session=chef"))).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(location(&headers), "/dashboard", "{path}");
    }

    let (status, _, _) = send(&router, get_with("/dashboard/x", Some("session=chef"))).await;
    assert_eq!(status, StatusCode::OK);
}
