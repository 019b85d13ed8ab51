//! Portcullis web server.
//!
//! Form login backed by the principal directory, cookie sessions, and one
//! handler per catalogue route that enforces the route's policy.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
pub mod extract;
mod pages;
pub mod routes;
pub mod session;
pub mod state;

pub use error::ServerError;
pub use extract::AuthenticatedPrincipal;
pub use session::{SessionId, SessionStore};
pub use state::{AppState, CookieSettings};

/// Builds the application router.
///
/// Every route in the state's catalogue gets a GET handler guarded by its
/// policy.
pub fn build_router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(routes::index))
        .route("/healthz", get(routes::healthz))
        .route("/login", get(routes::login_form).post(routes::login))
        .route("/logout", get(routes::logout))
        .route("/dashboard", get(routes::dashboard));

    for route in state.catalog.routes() {
        let path: Arc<str> = Arc::from(route.path.as_str());
        app = app.route(
            &route.path,
            get(
                move |State(state): State<AppState>,
                      AuthenticatedPrincipal(principal): AuthenticatedPrincipal| {
                    let path = Arc::clone(&path);
                    async move { routes::protected(&state, &principal, &path) }
                },
            ),
        );
    }

    app.fallback(|| async { (StatusCode::NOT_FOUND, "Not found") })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves `state` on `addr` until `shutdown` resolves.
pub async fn run(
    state: AppState,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let routes = state.catalog.len();
    let listener = TcpListener::bind(addr).await?;
    info!(address = %listener.local_addr()?, routes, "Portcullis listening");

    let sweeper = state
        .sessions
        .spawn_sweeper(sweep_period(state.sessions.ttl()));
    let app = build_router(state);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;
    sweeper.abort();
    served?;

    info!("Portcullis stopped");
    Ok(())
}

/// Sweep once per TTL, but no more than once a second.
fn sweep_period(ttl: Duration) -> Duration {
    ttl.max(Duration::from_secs(1))
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
