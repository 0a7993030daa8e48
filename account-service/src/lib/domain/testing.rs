//! Mocks and fixtures shared by the domain unit tests.

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;

use crate::file::errors::FileError;
use crate::file::models::StoredFile;
use crate::file::ports::FileStorage;
use crate::mail::errors::MailError;
use crate::mail::models::MailMessage;
use crate::mail::ports::Mailer;
use crate::user::errors::UserError;
use crate::user::models::CreateUserCommand;
use crate::user::models::EmailAddress;
use crate::user::models::Name;
use crate::user::models::NewUser;
use crate::user::models::Password;
use crate::user::models::ReplaceUserCommand;
use crate::user::models::Role;
use crate::user::models::UpdateUserCommand;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

pub const TEST_SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

mock! {
    pub TestUserRepository {}

    #[async_trait]
    impl UserRepository for TestUserRepository {
        async fn create(&self, user: NewUser) -> Result<User, UserError>;
        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
        async fn list_all(&self) -> Result<Vec<User>, UserError>;
        async fn update(&self, user: User) -> Result<User, UserError>;
        async fn update_password(
            &self,
            id: &UserId,
            password_hash: &str,
        ) -> Result<User, UserError>;
        async fn delete(&self, id: &UserId) -> Result<(), UserError>;
    }
}

mock! {
    pub TestUserService {}

    #[async_trait]
    impl UserServicePort for TestUserService {
        async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;
        async fn list_users(&self) -> Result<Vec<User>, UserError>;
        async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
        async fn get_user_by_email(&self, email: &str) -> Result<User, UserError>;
        async fn update_user(
            &self,
            id: &UserId,
            command: ReplaceUserCommand,
        ) -> Result<User, UserError>;
        async fn update_user_partial(
            &self,
            id: &UserId,
            command: UpdateUserCommand,
        ) -> Result<User, UserError>;
        async fn update_password(&self, id: &UserId, password: Password) -> Result<User, UserError>;
        async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
    }
}

mock! {
    pub TestMailer {}

    #[async_trait]
    impl Mailer for TestMailer {
        async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
    }
}

mock! {
    pub TestFileStorage {}

    #[async_trait]
    impl FileStorage for TestFileStorage {
        async fn store(&self, relative_path: &str, bytes: &[u8]) -> Result<StoredFile, FileError>;
    }
}

/// A persisted user named `User {id}` with a placeholder hash.
pub fn sample_user(id: i64, email: &str) -> User {
    User {
        id: UserId::new(id).unwrap(),
        name: Name::new(format!("User {}", id)).unwrap(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$placeholder".to_string(),
        birth_at: None,
        role: Role::User,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
