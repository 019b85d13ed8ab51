//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::response::Redirect;
use portcullis::Principal;
use tracing::debug;

use crate::session::SessionId;
use crate::state::AppState;

/// The principal behind the request's session cookie.
///
/// Rejects with `303 See Other` to `/login` when there is no cookie, the
/// session is unknown or expired, or its user is no longer in the roster.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(pub Principal);

impl FromRequestParts<AppState> for AuthenticatedPrincipal {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = session_id(&parts.headers, &state.cookie.name)
            .and_then(|id| state.sessions.resolve(id))
            .and_then(|username| state.store.find_by_username(username.as_str()).cloned());

        match principal {
            Some(principal) => Ok(AuthenticatedPrincipal(principal)),
            None => {
                debug!(path = %parts.uri.path(), "no live session, redirecting to login");
                Err(Redirect::to("/login"))
            }
        }
    }
}

/// Reads the session id from the `Cookie` headers, if present and well formed.
pub fn session_id(headers: &HeaderMap, cookie_name: &str) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            if name == cookie_name {
                value.parse().ok()
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_id_among_other_cookies() {
        let id = "0b6a1a4e-3c55-4d0b-9d61-0d9e2f3f7a10";
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; portcullis_session={id}; lang=en"))
                .unwrap(),
        );

        let found = session_id(&headers, "portcullis_session").unwrap();
        assert_eq!(found.to_string(), id);
    }

    #[test]
    fn test_missing_or_malformed_cookie() {
        let mut headers = HeaderMap::new();
        assert!(session_id(&headers, "portcullis_session").is_none());

        headers.insert(COOKIE, HeaderValue::from_static("portcullis_session=garbage"));
        assert!(session_id(&headers, "portcullis_session").is_none());

        headers.insert(
            COOKIE,
            HeaderValue::from_static("other_session=0b6a1a4e-3c55-4d0b-9d61-0d9e2f3f7a10"),
        );
        assert!(session_id(&headers, "portcullis_session").is_none());
    }
}
