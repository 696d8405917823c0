use std::net::SocketAddr;
use std::time::Duration;

use axum::http::Method;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use occupado_backend::{
    build_router,
    config::Config,
    db::connection::create_pool,
    services::{notifier::StatusNotifier, occupancy::OccupancyService, sweeper},
    state::AppState,
};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "occupado_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        database_url = %config.database_url,
        admin_password = %mask_secret(&config.admin_password),
        port = config.port,
        session_ttl_seconds = config.session_ttl_seconds,
        sweep_interval_seconds = config.sweep_interval_seconds,
        "Loaded configuration from environment/.env"
    );

    // Initialize database
    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let notifier = StatusNotifier::new();
    let occupancy = OccupancyService::new(
        pool,
        notifier,
        config.admin_password.clone(),
        config.session_ttl_seconds,
    );

    // Background expiry sweep
    let _sweeper = sweeper::spawn(
        occupancy.clone(),
        Duration::from_secs(config.sweep_interval_seconds),
    );

    let state = AppState::new(occupancy, config.clone());

    // Compose app with shared layers (CORS/Trace) and the static client
    let app = build_router(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                        .allow_headers(Any),
                ),
        );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
