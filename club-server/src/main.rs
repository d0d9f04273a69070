use anyhow::Result;
use axum::{routing::get, Router};
use club_api::{AppState, AuthConfig};
use club_storage::ClubStore;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::Config::load()?;
    init_tracing(&config);

    tracing::info!("Starting club server");

    let store = ClubStore::new();
    store
        .seed(&config.admin_email, &config.admin_password)
        .await?;
    tracing::info!("Store initialized");

    let state = AppState::new(
        store,
        AuthConfig::new(config.jwt_secret.clone(), config.jwt_ttl_hours),
    )
    .with_default_page_size(config.default_page_size);

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", club_api::routes(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &config::Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "club_server={level},club_api={level},club_storage={level},tower_http=debug",
            level = config.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn health_check() -> &'static str {
    "OK"
}
