use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn forget(
    State(state): State<AppState>,
    Json(body): Json<ForgetRequest>,
) -> Result<ApiSuccess<bool>, ApiError> {
    state
        .auth_service
        .forget(&body.email)
        .await
        .map_err(ApiError::from)
        .map(|sent| ApiSuccess::new(StatusCode::OK, sent))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgetRequest {
    email: String,
}
