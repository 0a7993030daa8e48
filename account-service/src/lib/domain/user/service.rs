use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::ReplaceUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    fn hash(&self, password: &Password) -> Result<String, UserError> {
        self.password_hasher
            .hash(password.expose())
            .map_err(|e| UserError::Password(PasswordError::HashingFailed(e.to_string())))
    }

    async fn existing(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash(&command.password)?;

        let user = NewUser {
            name: command.name,
            email: command.email,
            password_hash,
            birth_at: command.birth_at,
            role: command.role.unwrap_or_default(),
        };

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, "User created");

        Ok(created)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.existing(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFoundByEmail(email.to_string()))
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: ReplaceUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self.existing(id).await?;

        user.name = command.name;
        user.email = command.email;
        user.password_hash = self.hash(&command.password)?;
        user.birth_at = command.birth_at;
        user.role = command.role.unwrap_or_default();

        self.repository.update(user).await
    }

    async fn update_user_partial(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self.existing(id).await?;

        if let Some(name) = command.name {
            user.name = name;
        }

        if let Some(email) = command.email {
            user.email = email;
        }

        if let Some(password) = command.password {
            user.password_hash = self.hash(&password)?;
        }

        if let Some(birth_at) = command.birth_at {
            user.birth_at = Some(birth_at);
        }

        if let Some(role) = command.role {
            user.role = role;
        }

        self.repository.update(user).await
    }

    async fn update_password(&self, id: &UserId, password: Password) -> Result<User, UserError> {
        let password_hash = self.hash(&password)?;
        let user = self.repository.update_password(id, &password_hash).await?;
        tracing::info!(user_id = %user.id, "Password updated");

        Ok(user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
