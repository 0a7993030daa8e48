use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::auth::models::Registration;
use crate::auth::ports::AuthServicePort;
use crate::domain::user::models::parse_birth_date;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Name;
use crate::domain::user::models::Password;
use crate::domain::user::models::Role;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|ref registration| ApiSuccess::new(StatusCode::CREATED, registration.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    name: String,
    email: String,
    password: String,
    birth_at: Option<String>,
    role: Option<i32>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, UserError> {
        let name = Name::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let birth_at = self.birth_at.as_deref().map(parse_birth_date).transpose()?;
        let role = self.role.map(Role::from_code).transpose()?;

        Ok(CreateUserCommand::new(name, email, password)
            .with_birth_date(birth_at)
            .with_role(role))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponseData {
    pub user: UserData,
    pub access_token: String,
}

impl From<&Registration> for RegisterResponseData {
    fn from(registration: &Registration) -> Self {
        Self {
            user: (&registration.user).into(),
            access_token: registration.access_token.as_str().to_string(),
        }
    }
}
