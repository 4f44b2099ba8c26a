/// Common test utilities for integration tests
///
/// Provides shared infrastructure for integration tests:
/// - Test database setup (migrations)
/// - Test user creation and JWT token generation
/// - Request/response helpers against the in-process router
///
/// Integration tests need a running Postgres reachable via `DATABASE_URL`
/// and are marked `#[ignore]`; run them with `cargo test -- --ignored`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use pinboard_api::app::{build_router, AppState};
use pinboard_api::config::Config;
use pinboard_shared::auth::jwt::{create_token, Claims, TokenType};
use pinboard_shared::auth::password::hash_password;
use pinboard_shared::models::user::{CreateUser, User};
use sqlx::PgPool;
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub jwt_token: String,
}

impl TestContext {
    /// Creates a new test context with a migrated database and one user
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Migrations live in the shared crate (path relative to this crate's
        // Cargo.toml)
        sqlx::migrate!("../pinboard-shared/migrations").run(&db).await?;

        let user = create_test_user(&db, "Test User").await?;

        let claims = Claims::new(user.id, TokenType::Access);
        let jwt_token = create_token(&claims, &config.jwt.secret)?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            user,
            jwt_token,
        })
    }

    /// Returns the authorization header value for the context's user
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Returns an authorization header for an arbitrary user
    pub fn auth_header_for(&self, user_id: Uuid) -> anyhow::Result<String> {
        let claims = Claims::new(user_id, TokenType::Access);
        let token = create_token(&claims, &self.config.jwt.secret)?;
        Ok(format!("Bearer {}", token))
    }

    /// Sends a JSON request to the in-process app and parses the response
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        auth: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(auth) = auth {
            builder = builder.header("authorization", auth);
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.app.clone().call(request).await?;
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let json: serde_json::Value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, json))
    }

    /// Removes the context's user (cascades to their boards and content)
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(self.user.id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

/// Creates a user with a unique email and a real password hash
pub async fn create_test_user(db: &PgPool, name: &str) -> anyhow::Result<User> {
    let user = User::create(
        db,
        CreateUser {
            email: format!("test-{}@example.com", Uuid::new_v4()),
            password_hash: hash_password("test_password_1")?,
            name: name.to_string(),
        },
    )
    .await?;

    Ok(user)
}
