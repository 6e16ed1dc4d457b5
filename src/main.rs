use anyhow::Context;
use axum::http::HeaderValue;
use axum::serve;
use findoc::api::routes::create_router;
use findoc::config::AppConfig;
use findoc::store::PostgresStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with explicit filter to suppress sqlx debug logs
    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("sqlx", LevelFilter::Warn)
        .init();

    println!("Findoc: Bank Document Record Service");

    // Load configuration
    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: server={}:{}",
        config.server.host, config.server.port
    );

    println!("Connecting to PostgreSQL...");
    let database_url = config.database_url()?;
    let postgres_store = PostgresStore::new(&database_url, config.max_connections()).await?;

    println!("Running database migrations...");
    postgres_store.migrate().await?;
    println!("Database ready");

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

    let app = create_router().with_state(store).layer(cors);

    run_server(app, &config).await?;

    Ok(())
}

async fn run_server(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    println!("Findoc server running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
