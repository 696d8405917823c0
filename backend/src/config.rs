use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub admin_password: String,
    pub port: u16,
    pub session_ttl_seconds: i64,
    pub sweep_interval_seconds: u64,
    pub static_dir: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./occupado.db".to_string());

        let admin_password =
            env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "poop-bot".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        // 45 minutes, matching the fixed session TTL.
        let session_ttl_seconds = env::var("SESSION_TTL_SECONDS")
            .unwrap_or_else(|_| "2700".to_string())
            .parse()
            .unwrap_or(2700);

        let sweep_interval_seconds = env::var("SWEEP_INTERVAL_SECONDS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .unwrap_or(60);

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string());

        Ok(Config {
            database_url,
            admin_password,
            port,
            session_ttl_seconds,
            sweep_interval_seconds,
            static_dir,
        })
    }
}
