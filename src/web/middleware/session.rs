//! Session cookie extractors.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use crate::member::Member;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Extractor for a logged-in member.
///
/// Reads the session token from the session cookie and resets the
/// session's idle timer. Rejects with 401 when there is no live session.
#[derive(Debug, Clone)]
pub struct SessionMember {
    /// Session token.
    pub token: String,
    /// Member snapshot held by the session.
    pub member: Member,
}

/// Read the session token from the request cookies.
pub fn session_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for SessionMember {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts, &state.session_cookie_name)
            .ok_or_else(|| ApiError::unauthorized("Login required"))?;

        let mut sessions = state.sessions.write().await;
        let session = sessions.touch(&token).map_err(|e| {
            tracing::debug!("Session rejected: {}", e);
            ApiError::from(e)
        })?;

        Ok(SessionMember {
            member: session.member.clone(),
            token,
        })
    }
}
