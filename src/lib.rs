pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export logic types
pub use logic::{RecordError, RecordOperations};

// Export all model types
pub use model::*;

// Export store types
pub use store::{CollectionStore, MemoryStore, PostgresStore, Store};

// Function for embedding and integration testing
pub async fn run_server() -> anyhow::Result<()> {
    use anyhow::Context;
    use axum::http::HeaderValue;
    use axum::serve;
    use std::sync::Arc;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};

    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with INFO level only (suppress DEBUG logs)
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    // Load configuration
    let config = crate::config::AppConfig::load()?;

    // Connect to PostgreSQL
    let database_url = config.database_url()?;
    let postgres_store =
        crate::store::PostgresStore::new(&database_url, config.max_connections()).await?;

    // Run migrations
    postgres_store.migrate().await?;

    let store = Arc::new(postgres_store);

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors
                .allowed_origin
                .parse::<HeaderValue>()
                .context("Invalid CORS allowed origin")?,
        )
        .allow_methods(Any)
        .allow_headers(Any);

    // Create router with state
    let app = crate::api::routes::create_router()
        .with_state(store)
        .layer(cors);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;

    serve(listener, app).await?;

    Ok(())
}
