use std::sync::Arc;

use sea_orm::{Database, DatabaseConnection};
use tracing_subscriber::EnvFilter;

use luso_beauty::api::create_api_router;
use luso_beauty::config::{AppConfig, AppState};
use luso_beauty::entities::{seed_catalog, setup_schema};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("Incomplete environment");

    let db: DatabaseConnection = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to the database");
    setup_schema(&db).await.expect("Failed to create schema");
    seed_catalog(&db).await.expect("Failed to seed catalog");

    let state = AppState::new(Arc::new(db), &config);
    let app = create_api_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Running at {}", config.bind_addr);
    axum::serve(listener, app).await.expect("Server error");
}
