use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;
mod error;
mod extract;
mod jwt;
mod middleware;
mod models;
mod password;
mod repositories;
mod routes;
mod state;
mod validation;

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};

use crate::{
    config::ServerConfig,
    jwt::{JwtConfig, JwtService},
    password::CredentialHasher,
    repositories::{
        PgCommentRepository, PgPhotoRepository, PgSocialMediaRepository, PgUserRepository,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting MyGram API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool).await?;

    let jwt_service = JwtService::new(JwtConfig::from_env()?);
    info!(
        "Issuing tokens valid for {} seconds",
        jwt_service.token_expiry()
    );

    let app_state = AppState {
        jwt_service,
        hasher: CredentialHasher::default(),
        user_repository: Arc::new(PgUserRepository::new(pool.clone())),
        photo_repository: Arc::new(PgPhotoRepository::new(pool.clone())),
        comment_repository: Arc::new(PgCommentRepository::new(pool.clone())),
        social_media_repository: Arc::new(PgSocialMediaRepository::new(pool.clone())),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let server_config = ServerConfig::from_env()?;
    let address = server_config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("API service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("API service stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
