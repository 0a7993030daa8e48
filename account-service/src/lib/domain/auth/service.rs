use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use auth::IssueOptions;

use crate::auth::errors::AuthError;
use crate::auth::models::reset_namespace;
use crate::auth::models::session_namespace;
use crate::auth::models::AccessToken;
use crate::auth::models::Registration;
use crate::auth::models::ResetPayload;
use crate::auth::models::SessionPayload;
use crate::auth::models::TokenPolicy;
use crate::auth::ports::AuthServicePort;
use crate::mail::models::MailMessage;
use crate::mail::ports::Mailer;
use crate::user::errors::UserError;
use crate::user::models::CreateUserCommand;
use crate::user::models::Password;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::ports::UserServicePort;

const UNKNOWN_EMAIL: &str = "Incorrect email.";
const RESET_SUBJECT: &str = "Password recovery";
const RESET_TEMPLATE: &str = "forget";

/// Authentication flows on top of the user service and the token codec.
pub struct AuthService<US, M>
where
    US: UserServicePort,
    M: Mailer,
{
    users: Arc<US>,
    mailer: Arc<M>,
    authenticator: Arc<Authenticator>,
    policy: TokenPolicy,
}

impl<US, M> AuthService<US, M>
where
    US: UserServicePort,
    M: Mailer,
{
    /// Create a new auth service.
    ///
    /// # Arguments
    /// * `users` - User lookups and password writes
    /// * `mailer` - Delivery of reset tokens
    /// * `authenticator` - Password verification and token signing
    /// * `policy` - Session and reset token lifetimes
    pub fn new(
        users: Arc<US>,
        mailer: Arc<M>,
        authenticator: Arc<Authenticator>,
        policy: TokenPolicy,
    ) -> Self {
        Self {
            users,
            mailer,
            authenticator,
            policy,
        }
    }

    fn session_options(&self, user: &User) -> IssueOptions {
        IssueOptions::new(user.id, session_namespace(), self.policy.session_ttl)
    }
}

#[async_trait]
impl<US, M> AuthServicePort for AuthService<US, M>
where
    US: UserServicePort,
    M: Mailer,
{
    async fn register(&self, command: CreateUserCommand) -> Result<Registration, AuthError> {
        let user = self.users.create_user(command).await?;
        let access_token = self.create_token(&user)?;

        Ok(Registration { user, access_token })
    }

    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, AuthError> {
        let user = match self.users.get_user_by_email(email).await {
            Ok(user) => user,
            Err(UserError::NotFoundByEmail(_)) => {
                tracing::warn!("Login attempt for unknown email");
                return Err(AuthError::invalid_credentials());
            }
            Err(e) => return Err(e.into()),
        };

        let payload = SessionPayload::from(&user);
        let result = self.authenticator.authenticate(
            password,
            &user.password_hash,
            &payload,
            &self.session_options(&user),
        );

        match result {
            Ok(result) => {
                tracing::info!(user_id = %user.id, "User logged in");
                Ok(AccessToken(result.access_token))
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!(user_id = %user.id, "Login attempt with wrong password");
                Err(AuthError::invalid_credentials())
            }
            Err(AuthenticationError::PasswordError(e)) => Err(AuthError::Password(e)),
            Err(AuthenticationError::JwtError(e)) => Err(AuthError::TokenIssue(e)),
        }
    }

    async fn forget(&self, email: &str) -> Result<bool, AuthError> {
        let user = match self.users.get_user_by_email(email).await {
            Ok(user) => user,
            Err(UserError::NotFoundByEmail(_)) => {
                return Err(AuthError::Unauthorized(UNKNOWN_EMAIL.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let options = IssueOptions::new(user.id, reset_namespace(), self.policy.reset_ttl);
        let token = self
            .authenticator
            .issue_token(&ResetPayload { id: user.id.value() }, &options)
            .map_err(AuthError::TokenIssue)?;

        let message = MailMessage::new(user.email.as_str(), RESET_SUBJECT, RESET_TEMPLATE)
            .with_context("name", user.name.as_str())
            .with_context("token", token);

        self.mailer.send(&message).await?;
        tracing::info!(user_id = %user.id, "Password reset token sent");

        Ok(true)
    }

    async fn reset(&self, password: &str, token: &str) -> Result<AccessToken, AuthError> {
        let claims = self
            .authenticator
            .validate_token(token, &reset_namespace())
            .map_err(|e| {
                tracing::debug!(error = %e, "Reset token rejected");
                AuthError::invalid_token()
            })?;

        let id = claims
            .sub
            .as_deref()
            .and_then(|sub| UserId::from_string(sub).ok())
            .ok_or_else(AuthError::invalid_token)?;

        let password =
            Password::new(password.to_string()).map_err(|e| AuthError::BadRequest(e.to_string()))?;

        let user = match self.users.update_password(&id, password).await {
            Ok(user) => user,
            Err(UserError::NotFound(_)) => return Err(AuthError::invalid_token()),
            Err(e) => return Err(e.into()),
        };

        self.create_token(&user)
    }

    fn check_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.authenticator
            .validate_token(token, &session_namespace())
            .map_err(|e| {
                tracing::debug!(error = %e, "Session token rejected");
                AuthError::invalid_token()
            })
    }

    fn is_valid_token(&self, token: &str) -> bool {
        self.check_token(token).is_ok()
    }

    fn create_token(&self, user: &User) -> Result<AccessToken, AuthError> {
        self.authenticator
            .issue_token(&SessionPayload::from(user), &self.session_options(user))
            .map(AccessToken)
            .map_err(AuthError::TokenIssue)
    }
}
