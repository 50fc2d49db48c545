use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::JwtHandler;
use auth::SessionClaims;
use serde_json::json;
use serde_json::Value;
use user_service::domain::authentication::service::AuthService;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server backed by the in-memory store
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application with 24 hour sessions
    pub async fn spawn() -> Self {
        Self::spawn_with_session_hours(24).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with_session_hours(session_duration_hours: u32) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::new());
        let authenticator =
            Arc::new(Authenticator::new(TEST_SECRET).expect("Failed to create authenticator"));

        let user_service = Arc::new(UserService::new(Arc::clone(&repository)));
        let auth_service = Arc::new(AuthService::new(
            repository,
            Arc::clone(&authenticator),
            session_duration_hours,
        ));

        let router = create_router(
            user_service,
            auth_service,
            authenticator,
            Duration::from_secs(30),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET).expect("Failed to create JWT handler"),
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

    /// Helper to make POST request with a `bearer <token>` Authorization header
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path)
            .header("Authorization", format!("bearer {}", token))
    }

    /// Register a user and return the response `data` object
    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/users")
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in and return the issued token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("token is a string")
            .to_string()
    }

    /// Sign a token for an arbitrary identity with the server's key
    pub fn forge_token(&self, claims: &SessionClaims) -> String {
        self.jwt_handler
            .encode(claims)
            .expect("Failed to encode token")
    }
}
