use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::login::AccessTokenData;
use super::ApiError;
use super::ApiSuccess;
use crate::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn reset(
    State(state): State<AppState>,
    Json(body): Json<ResetRequest>,
) -> Result<ApiSuccess<AccessTokenData>, ApiError> {
    state
        .auth_service
        .reset(&body.password, &body.token)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetRequest {
    password: String,
    token: String,
}
