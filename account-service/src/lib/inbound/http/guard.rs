use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::models::RequestIdentity;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Same answer for every denial so clients learn nothing about the cause.
const FORBIDDEN_MESSAGE: &str = "Forbidden resource";

/// Handlers taking a `RequestIdentity` only run for signed-in users.
#[async_trait]
impl FromRequestParts<AppState> for RequestIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        state.guard.authenticate(header).await.map_err(|denied| {
            tracing::warn!(
                reason = %denied.reason,
                method = %parts.method,
                uri = %parts.uri,
                "Request denied"
            );
            ApiError::Forbidden(FORBIDDEN_MESSAGE.to_string())
        })
    }
}
