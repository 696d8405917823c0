use axum::{
    routing::{get, post},
    Router,
};

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use state::AppState;

/// The API surface, without the transport-level layers (CORS, tracing,
/// static files) that `main` adds around it.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(handlers::sessions::get_status))
        .route("/api/checkin", post(handlers::sessions::checkin))
        .route("/api/checkout", post(handlers::sessions::checkout))
        .route("/api/admin/kick", post(handlers::admin::kick))
        .route("/ws", get(handlers::ws::websocket_handler))
        .with_state(state)
}
