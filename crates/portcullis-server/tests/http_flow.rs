//! End-to-end HTTP tests against the router.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use portcullis::{Enforcer, PrincipalStore, RouteCatalog};
use portcullis_config::SessionConfig;
use portcullis_directory::Argon2Verifier;
use portcullis_server::{AppState, build_router};
use tower::ServiceExt;

fn state_with(session: &SessionConfig) -> AppState {
    let store = PrincipalStore::seeded(Arc::new(Argon2Verifier::for_tests())).expect("store");
    AppState::new(store, RouteCatalog::standard(), session)
        .with_enforcer(Enforcer::new().without_audit())
}

fn app() -> Router {
    static APP: OnceLock<Router> = OnceLock::new();
    APP.get_or_init(|| build_router(state_with(&SessionConfig::default())))
        .clone()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header")
}

async fn get(app: &Router, path: &str, cookie: Option<&str>) -> Response<Body> {
    let mut req = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        req = req.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(req.body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

async fn post_login(app: &Router, username: &str, password: &str) -> Response<Body> {
    let req = Request::builder()
        .method("POST")
        .uri("/login")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={username}&password={password}")))
        .expect("request");
    app.clone().oneshot(req).await.expect("response")
}

/// Logs in and returns the `name=value` pair to send back as `Cookie`.
async fn login(app: &Router, username: &str) -> String {
    let response = post_login(app, username, "pass").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("session cookie");
    set_cookie.split(';').next().expect("cookie pair").to_string()
}

// ============================================================================
// Public routes
// ============================================================================

#[tokio::test]
async fn index_says_hello() {
    let response = get(&app(), "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Hello, World!");
}

#[tokio::test]
async fn healthz_reports_ok() {
    let response = get(&app(), "/healthz", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn login_page_has_form() {
    let response = get(&app(), "/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains(r#"<form method="post" action="/login">"#));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let response = get(&app(), "/nope", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn protected_routes_redirect_without_session() {
    let app = app();
    for path in ["/dashboard", "/admin", "/hr", "/finance-manager", "/exec-clearance-3"] {
        let response = get(&app, path, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), "/login", "{path}");
    }
}

#[tokio::test]
async fn forged_session_cookie_redirects() {
    let response = get(
        &app(),
        "/dashboard",
        Some("portcullis_session=0b6a1a4e-3c55-4d0b-9d61-0d9e2f3f7a10"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn login_success_sets_session_cookie() {
    let response = post_login(&app(), "user3", "pass").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("portcullis_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
}

#[tokio::test]
async fn login_failure_redirects_to_login() {
    let app = app();
    for (username, password) in [("user3", "wrong"), ("nobody", "pass"), ("USER3", "pass")] {
        let response = post_login(&app, username, password).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        assert!(response.headers().get(SET_COOKIE).is_none());
    }
}

#[tokio::test]
async fn dashboard_shows_principal() {
    let app = app();
    let cookie = login(&app, "user5").await;

    let response = get(&app, "/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Welcome, user5"));
    assert!(body.contains("Department: hr"));
}

#[tokio::test]
async fn logout_invalidates_session() {
    let app = app();
    let cookie = login(&app, "user1").await;
    assert_eq!(get(&app, "/dashboard", Some(&cookie)).await.status(), StatusCode::OK);

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let cleared = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let response = get(&app, "/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn expired_session_redirects() {
    let session = SessionConfig {
        ttl_secs: 0,
        ..SessionConfig::default()
    };
    let app = build_router(state_with(&session));
    let cookie = login(&app, "user1").await;

    let response = get(&app, "/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn abandoned_sessions_are_reclaimed() {
    let session = SessionConfig {
        ttl_secs: 0,
        ..SessionConfig::default()
    };
    let state = state_with(&session);
    let sessions = state.sessions.clone();
    let app = build_router(state);

    for _ in 0..50 {
        login(&app, "user2").await;
    }
    // Each login drops the sessions that expired before it.
    assert_eq!(sessions.len(), 1);

    let sweeper = sessions.spawn_sweeper(Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(100)).await;
    sweeper.abort();

    let response = get(&app, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(sessions.is_empty());
}

// ============================================================================
// Authorization
// ============================================================================

#[tokio::test]
async fn admin_route_allows_admin_only() {
    let app = app();

    let admin = login(&app, "user1").await;
    let response = get(&app, "/admin", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Admin Page"));

    let staff = login(&app, "user2").await;
    let response = get(&app, "/admin", Some(&staff)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_text(response).await, "Forbidden");
}

#[tokio::test]
async fn hr_route_is_case_sensitive() {
    let app = app();

    let user4 = login(&app, "user4").await;
    assert_eq!(get(&app, "/hr", Some(&user4)).await.status(), StatusCode::OK);

    // user1 belongs to "HR", not "hr".
    let user1 = login(&app, "user1").await;
    assert_eq!(get(&app, "/hr", Some(&user1)).await.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn finance_manager_route() {
    let app = app();

    let user3 = login(&app, "user3").await;
    let response = get(&app, "/finance-manager", Some(&user3)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Welcome to the Finance Manager route!");

    let user2 = login(&app, "user2").await;
    let response = get(&app, "/finance-manager", Some(&user2)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unmatched_department_routes_deny_everyone() {
    let app = app();
    for user in ["user1", "user3", "user5", "user7"] {
        let cookie = login(&app, user).await;
        for path in ["/it-clearance-2", "/legal-director", "/ops-combined", "/exec-clearance-3"] {
            let response = get(&app, path, Some(&cookie)).await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{user} {path}");
        }
    }
}
