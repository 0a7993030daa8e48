#![allow(dead_code)]

use std::sync::atomic::AtomicI64;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::RwLock;

use account_service::auth::models::TokenPolicy;
use account_service::auth::service::AuthService;
use account_service::file::service::FileService;
use account_service::inbound::http::router::create_router;
use account_service::mail::errors::MailError;
use account_service::mail::models::MailMessage;
use account_service::mail::ports::Mailer;
use account_service::outbound::repositories::PostgresUserRepository;
use account_service::outbound::storage::LocalFileStorage;
use account_service::user::errors::UserError;
use account_service::user::models::NewUser;
use account_service::user::models::User;
use account_service::user::models::UserId;
use account_service::user::ports::UserRepository;
use account_service::user::service::UserService;
use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use tempfile::TempDir;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub mailer: Arc<RecordingMailer>,
    pub storage_dir: TempDir,
    pub db: Option<TestDb>,
}

impl TestApp {
    /// Spawn the application on an in-memory credential store
    pub async fn spawn() -> Self {
        Self::spawn_with(Arc::new(InMemoryUserRepository::default()), None).await
    }

    /// Spawn the application on a fresh Postgres database.
    ///
    /// Returns `None` when `DATABASE_URL` is not set.
    pub async fn spawn_with_postgres() -> Option<Self> {
        let db = TestDb::new().await?;
        let repository = Arc::new(PostgresUserRepository::new(db.pool.clone()));
        Some(Self::spawn_with(repository, Some(db)).await)
    }

    async fn spawn_with<R>(repository: Arc<R>, db: Option<TestDb>) -> Self
    where
        R: UserRepository,
    {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");
        let mailer = Arc::new(RecordingMailer::default());

        let user_service = Arc::new(UserService::new(repository));
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_service),
            Arc::clone(&mailer),
            Arc::new(Authenticator::new(TEST_SECRET)),
            TokenPolicy::default(),
        ));
        let file_service = Arc::new(FileService::new(Arc::new(LocalFileStorage::new(
            storage_dir.path(),
        ))));

        let router = create_router(user_service, auth_service, file_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET),
            mailer,
            storage_dir,
            db,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the response body `data`.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/auth/register")
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Register a user and return its id and session token.
    pub async fn register_and_token(&self, name: &str, email: &str) -> (i64, String) {
        let data = self.register(name, email, "pw123456").await;
        let id = data["user"]["id"].as_i64().expect("Missing user id");
        let token = data["accessToken"]
            .as_str()
            .expect("Missing access token")
            .to_string();
        (id, token)
    }
}

/// Mailer that keeps every message instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Token of the most recent message.
    pub fn last_token(&self) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .last()
            .and_then(|message| message.context.get("token").cloned())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Credential store kept in memory with the same uniqueness rules as the database.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
    next_id: AtomicI64,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.write().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let now = Utc::now();
        let created = User {
            id: UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)?,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            birth_at: user.birth_at,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().unwrap().iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .unwrap()
            .iter()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.users.read().unwrap().clone())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().unwrap();
        if users.iter().any(|u| u.email == user.email && u.id != user.id) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(UserError::NotFound(user.id.to_string()))?;
        *slot = User {
            updated_at: Utc::now(),
            ..user
        };
        Ok(slot.clone())
    }

    async fn update_password(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<User, UserError> {
        let mut users = self.users.write().unwrap();
        let slot = users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or(UserError::NotFound(id.to_string()))?;
        slot.password_hash = password_hash.to_string();
        slot.updated_at = Utc::now();
        Ok(slot.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.write().unwrap();
        let before = users.len();
        users.retain(|u| u.id != *id);

        if users.len() == before {
            return Err(UserError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Test database helper
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
}

impl TestDb {
    /// Create a new migrated test database with a unique name.
    ///
    /// Returns `None` when `DATABASE_URL` is not set.
    pub async fn new() -> Option<Self> {
        let Ok(postgres_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres test");
            return None;
        };

        let db_name = format!(
            "test_account_service_{}_{}_{}",
            std::process::id(),
            Utc::now().timestamp_micros(),
            DB_COUNTER.fetch_add(1, Ordering::SeqCst)
        );

        let mut conn = PgConnection::connect(&postgres_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = postgres_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self { pool, db_name })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        tokio::spawn(async move {
            let Ok(postgres_url) = std::env::var("DATABASE_URL") else {
                return;
            };

            if let Ok(mut conn) = PgConnection::connect(&postgres_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
