use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::auth::models::RequestIdentity;

/// Echo the signed-in user.
pub async fn me(identity: RequestIdentity) -> ApiSuccess<MeResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        MeResponseData {
            user: MeUserData {
                id: identity.user.id.value(),
                email: identity.user.email.to_string(),
                name: identity.user.name.to_string(),
            },
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub user: MeUserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeUserData {
    pub id: i64,
    pub email: String,
    pub name: String,
}
