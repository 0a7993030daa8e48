use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::auth::models::RequestIdentity;
use crate::domain::user::models::parse_birth_date;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Name;
use crate::domain::user::models::Password;
use crate::domain::user::models::ReplaceUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// HTTP request body for replacing a user (raw JSON)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub birth_at: Option<String>,
    pub role: Option<i32>,
}

impl ReplaceUserRequest {
    fn try_into_command(self) -> Result<ReplaceUserCommand, UserError> {
        Ok(ReplaceUserCommand {
            name: Name::new(self.name)?,
            email: EmailAddress::new(self.email)?,
            password: Password::new(self.password)?,
            birth_at: self.birth_at.as_deref().map(parse_birth_date).transpose()?,
            role: self.role.map(Role::from_code).transpose()?,
        })
    }
}

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub birth_at: Option<String>,
    pub role: Option<i32>,
}

impl PatchUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        // Validation happens here - errors are automatically converted via #[from]
        Ok(UpdateUserCommand {
            name: self.name.map(Name::new).transpose()?,
            email: self.email.map(EmailAddress::new).transpose()?,
            password: self.password.map(Password::new).transpose()?,
            birth_at: self.birth_at.as_deref().map(parse_birth_date).transpose()?,
            role: self.role.map(Role::from_code).transpose()?,
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    _identity: RequestIdentity,
    Path(id): Path<String>,
    Json(req): Json<ReplaceUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

pub async fn update_user_partial(
    State(state): State<AppState>,
    _identity: RequestIdentity,
    Path(id): Path<String>,
    Json(req): Json<PatchUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    let command = req.try_into_command()?;

    state
        .user_service
        .update_user_partial(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
