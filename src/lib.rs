pub mod auth;
pub mod config;
pub mod db;
pub mod error;

use std::sync::Arc;
use std::time::Duration;
use actix_web::{web, HttpResponse};
use tracing::info;

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{Argon2Hasher, AuthService, JwtTokenIssuer};
pub use db::{CredentialStore, InMemoryCredentialStore, PgCredentialStore, User};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Registers every route on an actix `App`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/hello", web::get().to(auth::handlers::hello))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::handlers::register))
                .route("/login", web::post().to(auth::handlers::login))
                .route("/logout", web::post().to(auth::handlers::logout))
                .route("/refresh", web::post().to(auth::handlers::refresh)),
        );
}

/// Application state shared across all components
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub auth_service: Arc<AuthService>,
    pg_store: Option<Arc<PgCredentialStore>>,
}

impl AppState {
    pub async fn new(config: Settings) -> Result<Self> {
        if config.database.in_memory {
            info!("Using in-memory credential store");
            return Ok(Self::with_store(config, Arc::new(InMemoryCredentialStore::new())));
        }

        let store = PgCredentialStore::new_with_options(
            &config.database.url,
            config.database.max_connections,
            Duration::from_secs(config.database.acquire_timeout_secs),
        )
        .await?;
        store.migrate().await?;

        let store = Arc::new(store);
        let mut state = Self::with_store(config, store.clone());
        state.pg_store = Some(store);
        Ok(state)
    }

    /// Builds the state around an existing store, with Argon2 hashing and
    /// JWTs configured from `config.auth`.
    pub fn with_store(config: Settings, store: Arc<dyn CredentialStore>) -> Self {
        let tokens = Arc::new(JwtTokenIssuer::from_config(&config.auth));
        let auth_service = AuthService::new(store, Arc::new(Argon2Hasher::new()), tokens);

        Self {
            config: Arc::new(config),
            auth_service: Arc::new(auth_service),
            pg_store: None,
        }
    }

    pub async fn shutdown(&self) -> Result<()> {
        if let Some(store) = &self.pg_store {
            store.close().await;
        }
        Ok(())
    }
}
