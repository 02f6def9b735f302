//! Access-token authentication extractor.
//!
//! Cart routes take [`RequireUser`] as their first extractor. The token is
//! read from the `accessToken` query parameter, or failing that from an
//! `Authorization: Bearer` header.

use axum::{
    extract::{FromRequestParts, Query},
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Deserialize;
use tracing::Span;

use crate::error::AppError;
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::state::AppState;

/// Extractor that requires a valid access token.
///
/// Rejects with 401 when the token is absent or unknown, regardless of any
/// other request input.
///
/// # Example
///
/// ```rust,ignore
/// async fn show(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireUser(pub CurrentUser);

#[derive(Debug, Default, Deserialize)]
struct TokenQuery {
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = access_token(parts);

        let store = state.read_store().await;
        let user = AuthService::new(&store).resolve_token(token.as_deref())?;
        let current = CurrentUser::from(user);
        drop(store);

        Span::current().record("user", current.username.as_str());
        Ok(Self(current))
    }
}

/// Token from the query string, falling back to a bearer header.
fn access_token(parts: &Parts) -> Option<String> {
    let from_query = Query::<TokenQuery>::try_from_uri(&parts.uri)
        .map(|Query(q)| q)
        .unwrap_or_default()
        .access_token
        .filter(|t| !t.is_empty());

    from_query.or_else(|| bearer_token(parts))
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}
