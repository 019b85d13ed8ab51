//! Handler errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use portcullis::AccessDenied;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// A route policy denied the principal.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// Background credential check did not complete.
    #[error("credential check failed: {0}")]
    CredentialTask(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            // Audit logging already happened in the enforcer.
            ServerError::Forbidden(_) => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
            ServerError::CredentialTask(e) => {
                error!(error = %e, "credential check task failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
