/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use pinboard_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = pinboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use pinboard_shared::auth::{jwt, middleware::AuthContext};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                          # Health check (public)
/// └── /v1/                             # API v1 (versioned)
///     ├── /auth/                       # Authentication (public)
///     │   ├── POST /register
///     │   ├── POST /login
///     │   └── POST /refresh
///     ├── /users/                      # Authenticated user profile
///     │   ├── GET  /me
///     │   ├── PUT  /me
///     │   └── PUT  /me/password
///     ├── /boards/                     # Boards and membership
///     │   ├── GET    /
///     │   ├── POST   /
///     │   ├── GET    /:id
///     │   ├── PUT    /:id
///     │   ├── DELETE /:id
///     │   ├── GET    /:id/members
///     │   ├── POST   /:id/members
///     │   └── DELETE /:id/members/:user_id
///     ├── /columns/
///     │   ├── GET  /board/:board_id
///     │   ├── POST /board/:board_id
///     │   ├── PUT  /board/:board_id/reorder
///     │   ├── PUT    /:id
///     │   └── DELETE /:id
///     ├── /cards/
///     │   ├── GET  /column/:column_id
///     │   ├── POST /column/:column_id
///     │   ├── GET    /:id
///     │   ├── PUT    /:id
///     │   ├── DELETE /:id
///     │   ├── PUT    /:id/move
///     │   ├── POST   /:id/labels
///     │   ├── DELETE /:id/labels/:label_id
///     │   └── POST   /:id/like
///     └── /comments/
///         ├── GET  /card/:card_id
///         ├── POST /card/:card_id
///         ├── PUT    /:id
///         └── DELETE /:id
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
/// 4. Authentication (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    let user_routes = Router::new()
        .route("/me", get(routes::users::get_me))
        .route("/me", put(routes::users::update_me))
        .route("/me/password", put(routes::users::change_password));

    let board_routes = Router::new()
        .route("/", get(routes::boards::list_boards))
        .route("/", post(routes::boards::create_board))
        .route("/:id", get(routes::boards::get_board))
        .route("/:id", put(routes::boards::update_board))
        .route("/:id", delete(routes::boards::delete_board))
        .route("/:id/members", get(routes::boards::list_members))
        .route("/:id/members", post(routes::boards::add_member))
        .route(
            "/:id/members/:user_id",
            delete(routes::boards::remove_member),
        );

    let column_routes = Router::new()
        .route("/board/:board_id", get(routes::columns::list_columns))
        .route("/board/:board_id", post(routes::columns::create_column))
        .route(
            "/board/:board_id/reorder",
            put(routes::columns::reorder_columns),
        )
        .route("/:id", put(routes::columns::update_column))
        .route("/:id", delete(routes::columns::delete_column));

    let card_routes = Router::new()
        .route("/column/:column_id", get(routes::cards::list_cards))
        .route("/column/:column_id", post(routes::cards::create_card))
        .route("/:id", get(routes::cards::get_card))
        .route("/:id", put(routes::cards::update_card))
        .route("/:id", delete(routes::cards::delete_card))
        .route("/:id/move", put(routes::cards::move_card))
        .route("/:id/labels", post(routes::cards::add_label))
        .route("/:id/labels/:label_id", delete(routes::cards::remove_label))
        .route("/:id/like", post(routes::cards::toggle_like));

    let comment_routes = Router::new()
        .route("/card/:card_id", get(routes::comments::list_comments))
        .route("/card/:card_id", post(routes::comments::create_comment))
        .route("/:id", put(routes::comments::update_comment))
        .route("/:id", delete(routes::comments::delete_comment));

    // Everything except /auth requires a valid access token
    let authed_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/boards", board_routes)
        .nest("/columns", column_routes)
        .nest("/cards", card_routes)
        .nest("/comments", comment_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let v1_routes = Router::new().nest("/auth", auth_routes).merge(authed_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Extracts and validates the JWT access token from the Authorization
/// header, then injects [`AuthContext`] into request extensions.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| crate::error::ApiError::BadRequest("Expected Bearer token".to_string()))?;

    let claims = jwt::validate_access_token(token, state.jwt_secret())?;

    req.extensions_mut().insert(AuthContext::from_jwt(claims.sub));

    Ok(next.run(req).await)
}
