use thiserror::Error;

use crate::mail::errors::MailError;
use crate::user::errors::UserError;

/// Shown for both unknown email and wrong password.
pub const INVALID_CREDENTIALS: &str = "Incorrect email and/or password.";
pub const INVALID_TOKEN: &str = "Invalid token.";

/// Errors of the authentication flows.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    InvalidToken(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    User(#[from] UserError),

    #[error("Mail dispatch failed: {0}")]
    Mail(#[from] MailError),

    #[error("Password verification failed: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token issuance failed: {0}")]
    TokenIssue(auth::JwtError),
}

impl AuthError {
    pub fn invalid_credentials() -> Self {
        AuthError::Unauthorized(INVALID_CREDENTIALS.to_string())
    }

    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(INVALID_TOKEN.to_string())
    }
}
