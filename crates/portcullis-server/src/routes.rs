//! HTTP handlers.

use std::sync::Arc;

use axum::Form;
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Redirect, Response};
use portcullis::{Policy, Principal};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::error::ServerError;
use crate::extract::{AuthenticatedPrincipal, session_id};
use crate::pages;
use crate::state::AppState;

/// GET /
pub async fn index() -> &'static str {
    "Hello, World!"
}

/// GET /healthz
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /login
pub async fn login_form() -> Html<&'static str> {
    Html(pages::LOGIN_HTML)
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /login
///
/// Success starts a session and redirects to `/dashboard`; failure
/// redirects back to `/login`.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, ServerError> {
    let store = Arc::clone(&state.store);
    let username = form.username.clone();
    // Argon2 verification is CPU-bound.
    let verified = tokio::task::spawn_blocking(move || {
        store
            .find_by_credentials(&form.username, &form.password)
            .map(|principal| principal.username.clone())
    })
    .await?;

    match verified {
        Ok(username) => {
            let id = state.sessions.create(username.clone());
            info!(username = %username, "login succeeded");
            let cookie = state.cookie.set(&id.to_string());
            Ok(([(SET_COOKIE, cookie)], Redirect::to("/dashboard")).into_response())
        }
        Err(e) => {
            warn!(username = %username, reason = %e, "login failed");
            Ok(Redirect::to("/login").into_response())
        }
    }
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = session_id(&headers, &state.cookie.name) {
        state.sessions.remove(id);
    }
    ([(SET_COOKIE, state.cookie.clear())], Redirect::to("/login")).into_response()
}

/// GET /dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Html<String> {
    pages::dashboard(&principal, &state.catalog)
}

/// GET on any catalogue path.
///
/// Enforces the path's policy and serves its page, or `403 Forbidden`.
pub fn protected(
    state: &AppState,
    principal: &Principal,
    path: &str,
) -> Result<Response, ServerError> {
    // Routes are registered from the catalogue, so a missing policy denies.
    let deny_all = Policy::AnyOf(Vec::new());
    let policy = state.catalog.policy_for(path).unwrap_or(&deny_all);

    state.enforcer.enforce(path, principal, policy)?;
    Ok(pages::protected_page(path))
}
