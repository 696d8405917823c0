use serde::{Deserialize, Serialize};

use crate::models::session::Session;

/// Read-only projection of the current occupancy state.
///
/// This is the shape pushed to every realtime subscriber and returned by
/// `GET /api/status`. The occupied variant intentionally carries the active
/// session's `device_token` so a subscribing client can compare it against
/// its locally cached token to decide whether it owns the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusView {
    pub occupied: bool,
    pub free: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_remaining: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_remaining: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds_remaining: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_token: Option<String>,
}

impl StatusView {
    pub fn vacant() -> Self {
        StatusView {
            occupied: false,
            free: true,
            username: None,
            check_in_time: None,
            expires_at: None,
            time_remaining: None,
            minutes_remaining: None,
            seconds_remaining: None,
            session_id: None,
            device_token: None,
        }
    }

    pub fn from_session(session: &Session, now: i64) -> Self {
        let time_remaining = (session.expires_at - now).max(0);
        StatusView {
            occupied: true,
            free: false,
            username: session.username.clone(),
            check_in_time: Some(session.check_in_time),
            expires_at: Some(session.expires_at),
            time_remaining: Some(time_remaining),
            minutes_remaining: Some(time_remaining / 60),
            seconds_remaining: Some(time_remaining % 60),
            session_id: Some(session.id),
            device_token: session.device_token.clone(),
        }
    }

    pub fn project(session: Option<&Session>, now: i64) -> Self {
        match session {
            Some(session) => Self::from_session(session, now),
            None => Self::vacant(),
        }
    }
}
