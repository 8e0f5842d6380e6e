//! Access-token authentication extractor for Axum handlers.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use flowgate_core::error::CoreError;
use flowgate_core::user::User;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the `access_token` query parameter.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication; it is unconditionally the first gate, so no request
/// reaches business logic without a resolved user:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %auth.user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// The token is the only accepted credential: a request carrying a bare
/// `user_id` but no `access_token` is still rejected.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The identity the token resolved to.
    pub user: User,
}

#[derive(Debug, Deserialize)]
struct AuthQuery {
    access_token: Option<String>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = Query::<AuthQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.access_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden(
                    "Missing access_token parameter".into(),
                ))
            })?;

        let user = state.user_store.resolve(&token).await.ok_or_else(|| {
            AppError::Core(CoreError::Forbidden("Invalid access token".into()))
        })?;

        Ok(AuthUser { user })
    }
}
