//! Occupancy session rows and the request/response payloads built from them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::StatusView;

/// Database representation of one occupancy period.
///
/// Rows are append-only history: ending a session (voluntarily, by admin
/// kick, or by the expiry sweep) only flips `active`; nothing is deleted
/// and an ended session never becomes active again.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: i64,
    pub username: Option<String>,
    /// Ownership token handed out once, at creation. Proves the right to
    /// voluntarily end this session.
    pub device_token: Option<String>,
    /// Epoch seconds.
    pub check_in_time: i64,
    /// Epoch seconds; `check_in_time` + TTL, immutable once set.
    pub expires_at: i64,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct CheckinRequest {
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub device_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KickRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct CheckinResponse {
    pub success: bool,
    pub session: Session,
    pub device_token: String,
    pub status: StatusView,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
    pub status: StatusView,
}
