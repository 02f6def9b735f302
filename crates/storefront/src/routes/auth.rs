//! Login handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use sunglasses_core::AccessToken;

use crate::error::{AppError, Result, set_sentry_user};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Login request body.
///
/// Either `username` or `email` identifies the user; `username` is used when
/// both are given.
#[derive(Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    fn identifier(&self) -> Option<&str> {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .or(self.email.as_deref())
    }
}

/// Log in and return the user's access token as a JSON string.
///
/// A missing or malformed body is treated as missing credentials.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    body: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AccessToken>> {
    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable login body");
        AuthError::MissingCredentials
    })?;
    let password = request.password.clone().map(SecretString::from);

    let attempt = {
        let store = state.read_store().await;
        AuthService::new(&store)
            .begin_login(request.identifier(), password.as_ref())
            .inspect_err(|err| tracing::info!(error = %err, "Login failed"))?
    };

    // Argon2 runs on the blocking pool, outside the store lock
    let attempt = tokio::task::spawn_blocking(move || attempt.verify().map(|()| attempt))
        .await
        .map_err(|err| AppError::Internal(format!("login task failed: {err}")))?
        .inspect_err(|err| tracing::info!(error = %err, "Login failed"))?;

    set_sentry_user(attempt.username());
    tracing::info!(user = %attempt.username(), "User logged in");

    Ok(Json(attempt.into_token()))
}
