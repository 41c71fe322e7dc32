#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::AuthConfig;
use auth::Authenticator;
use chrono::Utc;
use contacts_service::contact::errors::ContactError;
use contacts_service::contact::models::Contact;
use contacts_service::contact::models::ContactDetails;
use contacts_service::contact::models::ContactId;
use contacts_service::contact::ports::ContactRepository;
use contacts_service::contact::service::ContactService;
use contacts_service::domain::auth::errors::EmailDispatchError;
use contacts_service::domain::auth::models::VerificationEmail;
use contacts_service::domain::auth::ports::EmailDispatcher;
use contacts_service::domain::auth::service::AuthService;
use contacts_service::inbound::http::router::create_router;
use contacts_service::user::errors::UserError;
use contacts_service::user::models::EmailAddress;
use contacts_service::user::models::NewUser;
use contacts_service::user::models::User;
use contacts_service::user::models::UserId;
use contacts_service::user::ports::UserRepository;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const PASSWORD: &str = "pass_word!";

/// Test application that spawns a real server over in-memory adapters
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub users: Arc<InMemoryUserRepository>,
    pub mailbox: Arc<RecordingEmailDispatcher>,
    pub authenticator: Arc<Authenticator>,
}

/// Tokens returned by a successful login
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserRepository::default());
        let contacts = Arc::new(InMemoryContactRepository::default());
        let mailbox = Arc::new(RecordingEmailDispatcher::default());
        let authenticator = Arc::new(
            Authenticator::new(AuthConfig::new(TEST_SECRET))
                .expect("Failed to create authenticator"),
        );

        let auth_service = Arc::new(AuthService::new(
            users.clone(),
            mailbox.clone(),
            authenticator.clone(),
        ));
        let contact_service = Arc::new(ContactService::new(contacts));

        let router = create_router(auth_service, contact_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            users,
            mailbox,
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
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
            .put(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub async fn signup(&self, email: &str) -> reqwest::Response {
        self.post("/auth/signup")
            .json(&json!({
                "email": email,
                "password": PASSWORD,
                "name": "Nicola"
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/login")
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Confirm an account with the last verification token sent to it
    pub async fn confirm(&self, email: &str) -> reqwest::Response {
        let token = self
            .mailbox
            .last_token_for(email)
            .expect("No verification email recorded");

        self.get(&format!("/auth/confirmed_email/{}", token))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign up, confirm and log in
    pub async fn logged_in_user(&self, email: &str) -> Tokens {
        self.signup(email).await;
        self.confirm(email).await;

        let body: Value = self
            .login(email, PASSWORD)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        Tokens {
            access_token: body["access_token"].as_str().unwrap().to_string(),
            refresh_token: body["refresh_token"].as_str().unwrap().to_string(),
        }
    }

    pub async fn create_contact(&self, access_token: &str, contact: Value) -> Value {
        self.post_authenticated("/contacts", access_token)
            .json(&contact)
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response")
    }
}

/// Throwaway Postgres database with migrations applied
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    server_url: String,
}

impl TestDb {
    /// Create a uniquely named database on the server at `DATABASE_URL`.
    ///
    /// Returns `None` when `DATABASE_URL` is not set so Postgres-backed
    /// tests can be skipped on machines without a server.
    pub async fn new() -> Option<Self> {
        let Ok(server_url) = std::env::var("DATABASE_URL") else {
            eprintln!("skipping Postgres test: set DATABASE_URL to run");
            return None;
        };

        let db_name = format!(
            "test_contacts_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&server_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = server_url
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

        Some(Self {
            pool,
            db_name,
            server_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let db_name = self.db_name.clone();
        let server_url = self.server_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&server_url).await {
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

/// Account store backed by a vector
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn stored_refresh_token(&self, email: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_str() == email)
            .and_then(|u| u.refresh_token.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let created = User {
            id: UserId(users.len() as i64 + 1),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            refresh_token: None,
            email_confirmed: false,
            created_at: Utc::now(),
        };
        users.push(created.clone());

        Ok(created)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.email == email).cloned())
    }

    async fn update_refresh_token(
        &self,
        id: UserId,
        token: Option<String>,
    ) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.refresh_token = token;
        Ok(())
    }

    async fn replace_refresh_token(
        &self,
        id: UserId,
        expected: &str,
        replacement: Option<String>,
    ) -> Result<bool, UserError> {
        let mut users = self.users.lock().unwrap();
        match users
            .iter_mut()
            .find(|u| u.id == id && u.refresh_token.as_deref() == Some(expected))
        {
            Some(user) => {
                user.refresh_token = replacement;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn confirm_email(&self, id: UserId) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.email_confirmed = true;
        Ok(())
    }
}

/// Contact store backed by a vector
#[derive(Default)]
pub struct InMemoryContactRepository {
    contacts: Mutex<Vec<Contact>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn create(
        &self,
        owner: UserId,
        details: ContactDetails,
    ) -> Result<Contact, ContactError> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;

        let contact = Contact {
            id: ContactId(*next_id),
            owner_id: owner,
            details,
            created_at: Utc::now(),
        };
        self.contacts.lock().unwrap().push(contact.clone());

        Ok(contact)
    }

    async fn find_by_id(
        &self,
        owner: UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, ContactError> {
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts
            .iter()
            .find(|c| c.owner_id == owner && c.id == id)
            .cloned())
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Contact>, ContactError> {
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts
            .iter()
            .filter(|c| c.owner_id == owner)
            .cloned()
            .collect())
    }

    async fn find_by_name(&self, owner: UserId, name: &str) -> Result<Vec<Contact>, ContactError> {
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts
            .iter()
            .filter(|c| c.owner_id == owner && c.details.name.as_str() == name)
            .cloned()
            .collect())
    }

    async fn find_by_term(&self, owner: UserId, term: &str) -> Result<Vec<Contact>, ContactError> {
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts
            .iter()
            .filter(|c| {
                c.owner_id == owner
                    && (c.details.name.as_str() == term
                        || c.details.surname.as_deref() == Some(term)
                        || c.details.email.as_ref().map(|e| e.as_str()) == Some(term))
            })
            .cloned()
            .collect())
    }

    async fn update(&self, contact: Contact) -> Result<Contact, ContactError> {
        let mut contacts = self.contacts.lock().unwrap();
        let stored = contacts
            .iter_mut()
            .find(|c| c.owner_id == contact.owner_id && c.id == contact.id)
            .ok_or(ContactError::NotFound(contact.id))?;
        stored.details = contact.details;
        Ok(stored.clone())
    }

    async fn delete(&self, owner: UserId, id: ContactId) -> Result<(), ContactError> {
        let mut contacts = self.contacts.lock().unwrap();
        let before = contacts.len();
        contacts.retain(|c| !(c.owner_id == owner && c.id == id));

        if contacts.len() == before {
            return Err(ContactError::NotFound(id));
        }
        Ok(())
    }
}

/// Dispatcher that keeps every verification email instead of publishing it
#[derive(Default)]
pub struct RecordingEmailDispatcher {
    sent: Mutex<Vec<VerificationEmail>>,
}

impl RecordingEmailDispatcher {
    pub fn sent_to(&self, email: &str) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.email.as_str() == email)
            .count()
    }

    pub fn last_token_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.email.as_str() == email)
            .map(|m| m.token.clone())
    }
}

#[async_trait]
impl EmailDispatcher for RecordingEmailDispatcher {
    async fn send_verification(&self, email: &VerificationEmail) -> Result<(), EmailDispatchError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
