use serde::Serialize;

use crate::jwt::Claims;
use crate::jwt::IssueOptions;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::Namespace;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and JWT token handling.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `payload` - Fields to embed in the token
    /// * `options` - Subject, namespace and lifetime of the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    /// * `JwtError` - Token generation failed
    pub fn authenticate<T: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        payload: &T,
        options: &IssueOptions,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.issue(payload, options)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    ///
    /// Used for flows where identity was established by other means
    /// (registration, password reset, reset-token mailing).
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token<T: Serialize>(
        &self,
        payload: &T,
        options: &IssueOptions,
    ) -> Result<String, JwtError> {
        self.jwt_handler.issue(payload, options)
    }

    /// Validate a token against a namespace and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token validation failed
    pub fn validate_token(&self, token: &str, namespace: &Namespace) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token, namespace)
    }
}
