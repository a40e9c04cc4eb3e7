//! Cafedex - a café directory REST API

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cafedex::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{SqlxAreaRepository, SqlxCafeRepository, SqlxUserRepository},
    },
    services::{AreaService, CafeService, TokenService, UserService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cafedex=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Cafedex API...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    if config.auth.uses_default_secret() {
        tracing::warn!(
            "Using the built-in development token secret; set CAFEDEX_AUTH_TOKEN_SECRET in production"
        );
    }

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    // Run migrations
    let applied = db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed ({} newly applied)", applied);

    // Create repositories
    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let cafe_repo = SqlxCafeRepository::boxed(pool.clone());
    let area_repo = SqlxAreaRepository::boxed(pool.clone());

    // Initialize services
    let token_service = Arc::new(TokenService::new(
        &config.auth.token_secret,
        config.auth.token_ttl_days,
    ));
    let user_service = Arc::new(UserService::new(
        user_repo,
        cafe_repo.clone(),
        token_service.clone(),
    ));
    let cafe_service = Arc::new(CafeService::new(cafe_repo));
    let area_service = Arc::new(AreaService::new(area_repo));

    // Build application state
    let state = AppState {
        user_service,
        cafe_service,
        area_service,
        token_service,
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
