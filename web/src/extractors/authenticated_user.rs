//! Extractor for the identity asserted by the upstream OAuth proxy.
//!
//! Authentication is delegated entirely to an external identity provider;
//! the proxy in front of this service terminates the OAuth flow and injects
//! the authenticated subject into each forwarded request. Requests arriving
//! without that assertion are rejected before any handler runs.

use crate::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use domain::users;
use log::*;

/// Header carrying the authenticated subject, set by the OAuth proxy.
const AUTH_USER_HEADER: &str = "x-auth-user-id";
/// Optional header carrying the subject's display name.
const AUTH_NAME_HEADER: &str = "x-auth-user-name";

pub(crate) struct AuthenticatedUser(pub users::Model);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let external_id = parts
            .headers
            .get(AUTH_USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or((StatusCode::UNAUTHORIZED, "UNAUTHORIZED"))?;

        let display_name = parts
            .headers
            .get(AUTH_NAME_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let user = domain::user::find_or_create(state.db_conn_ref(), external_id, display_name)
            .await
            .map_err(|err| {
                warn!("Failed to resolve authenticated user: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR")
            })?;

        Ok(AuthenticatedUser(user))
    }
}
