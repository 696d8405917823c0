#![allow(dead_code)]

use occupado_backend::{
    config::Config,
    db::connection::DbPool,
    services::{notifier::StatusNotifier, occupancy::OccupancyService},
    state::AppState,
};
use sqlx::sqlite::SqlitePoolOptions;

pub const TEST_ADMIN_PASSWORD: &str = "test-admin";
pub const TEST_TTL_SECONDS: i64 = 2700;

/// Fresh in-memory database with migrations applied. A single connection is
/// required: each `:memory:` connection is its own database.
pub async fn test_pool() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    pool
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        admin_password: TEST_ADMIN_PASSWORD.to_string(),
        port: 0,
        session_ttl_seconds: TEST_TTL_SECONDS,
        sweep_interval_seconds: 60,
        static_dir: "public".to_string(),
    }
}

pub fn test_service(pool: DbPool) -> OccupancyService {
    OccupancyService::new(
        pool,
        StatusNotifier::new(),
        TEST_ADMIN_PASSWORD.to_string(),
        TEST_TTL_SECONDS,
    )
}

pub fn test_state(pool: DbPool) -> AppState {
    AppState::new(test_service(pool), test_config())
}
