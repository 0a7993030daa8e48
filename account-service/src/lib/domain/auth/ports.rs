use async_trait::async_trait;
use auth::Claims;

use crate::auth::errors::AuthError;
use crate::auth::models::AccessToken;
use crate::auth::models::Registration;
use crate::user::models::CreateUserCommand;
use crate::user::models::User;

/// Port for the authentication flows.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create an account and sign it in.
    ///
    /// # Errors
    /// * `User` - Validation, duplicate email or storage failure
    /// * `TokenIssue` - Signing failed
    async fn register(&self, command: CreateUserCommand) -> Result<Registration, AuthError>;

    /// Exchange credentials for a session token.
    ///
    /// # Errors
    /// * `Unauthorized` - Unknown email or wrong password, same message for both
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, AuthError>;

    /// Mail a password reset token to the account owner.
    ///
    /// # Errors
    /// * `Unauthorized` - No account with this email; nothing is sent
    /// * `Mail` - Dispatch failed
    async fn forget(&self, email: &str) -> Result<bool, AuthError>;

    /// Set a new password using a reset token and sign the user in.
    ///
    /// # Errors
    /// * `InvalidToken` - Token fails verification or names no account
    /// * `BadRequest` - New password violates the password policy
    async fn reset(&self, password: &str, token: &str) -> Result<AccessToken, AuthError>;

    /// Verify a session token and return its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Any verification failure
    fn check_token(&self, token: &str) -> Result<Claims, AuthError>;

    /// Whether `token` is a currently valid session token.
    fn is_valid_token(&self, token: &str) -> bool;

    /// Issue a session token for `user`.
    ///
    /// # Errors
    /// * `TokenIssue` - Signing failed
    fn create_token(&self, user: &User) -> Result<AccessToken, AuthError>;
}
