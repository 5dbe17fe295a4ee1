use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod db;
pub mod repository;
pub mod security;
pub mod service;
pub mod settings;
pub mod state;

use crate::settings::Settings;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recap_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Recap server...");

    let settings = Settings::from_env().expect("Failed to load settings");
    settings.validate().expect("Invalid settings");

    tracing::info!("Connecting to database...");

    // Create database connection pool
    let pool = db::create_pool(&settings.database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Database connection pool created");

    // Run migrations
    db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let addr = settings.bind_addr.clone();

    // Build router with all API endpoints
    let app = api::create_router(AppState { pool, settings });

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
