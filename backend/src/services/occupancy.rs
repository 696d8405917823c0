//! Business rules for the single shared resource: who may check in, who may
//! check out, and what everyone else gets told about it.

use std::sync::Arc;

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use subtle::ConstantTimeEq;
use tokio::sync::Mutex;

use crate::db::connection::DbPool;
use crate::error::AppError;
use crate::models::session::Session;
use crate::models::status::StatusView;
use crate::repositories::session as session_repo;
use crate::services::notifier::{EventKind, StatusNotifier};

const DEVICE_TOKEN_LEN: usize = 32;

#[derive(Debug)]
pub struct CheckinOutcome {
    pub session: Session,
    pub device_token: String,
    pub status: StatusView,
}

#[derive(Clone)]
pub struct OccupancyService {
    pool: DbPool,
    notifier: StatusNotifier,
    admin_password: String,
    session_ttl_seconds: i64,
    /// Serializes the check-and-create sequence. Two concurrent check-ins
    /// both observing "free" is the one real race in the system.
    checkin_lock: Arc<Mutex<()>>,
}

impl OccupancyService {
    pub fn new(
        pool: DbPool,
        notifier: StatusNotifier,
        admin_password: String,
        session_ttl_seconds: i64,
    ) -> Self {
        Self {
            pool,
            notifier,
            admin_password,
            session_ttl_seconds,
            checkin_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn notifier(&self) -> &StatusNotifier {
        &self.notifier
    }

    fn now() -> i64 {
        Utc::now().timestamp()
    }

    /// Starts a new session if the resource is free.
    pub async fn check_in(&self, username: Option<String>) -> Result<CheckinOutcome, AppError> {
        let _guard = self.checkin_lock.lock().await;

        let now = Self::now();
        if let Some(current) = session_repo::current_active_session(&self.pool, now).await? {
            return Err(AppError::Conflict(
                "Toilet is already occupied".to_string(),
                StatusView::from_session(&current, now),
            ));
        }

        let username = username.filter(|name| !name.trim().is_empty());
        let device_token = generate_device_token();
        let session = session_repo::create_session(
            &self.pool,
            username.as_deref(),
            Some(&device_token),
            now,
            self.session_ttl_seconds,
        )
        .await?;

        let status = StatusView::from_session(&session, now);
        tracing::info!(session_id = session.id, "Checked in");
        self.notifier.broadcast(EventKind::Checkin, status.clone());
        self.notifier.broadcast(EventKind::Status, status.clone());

        Ok(CheckinOutcome {
            session,
            device_token,
            status,
        })
    }

    /// Ends the active session, but only for the token it was created with.
    pub async fn check_out(&self, device_token: Option<String>) -> Result<StatusView, AppError> {
        let now = Self::now();
        let current = session_repo::current_active_session(&self.pool, now).await?;

        let Some(current) = current else {
            return Err(AppError::NotFound(
                "No active session found".to_string(),
                StatusView::vacant(),
            ));
        };

        let Some(device_token) = device_token.filter(|token| !token.is_empty()) else {
            return Err(AppError::BadRequest(
                "Device token required".to_string(),
                StatusView::from_session(&current, now),
            ));
        };

        let ended = session_repo::end_session(&self.pool, current.id, Some(&device_token)).await?;
        if !ended {
            // Wrong token, or the session was ended concurrently. The store
            // cannot tell the two apart without a second read; both get a 403.
            let status = self.status().await?;
            return Err(AppError::Forbidden(
                "You can only check out from the device you checked in with".to_string(),
                status,
            ));
        }

        let status = self.status().await?;
        tracing::info!(session_id = current.id, "Checked out");
        self.notifier.broadcast(EventKind::Checkout, status.clone());
        self.notifier.broadcast(EventKind::Status, status.clone());
        Ok(status)
    }

    /// Ends the active session without a token check. Gated by the shared
    /// admin secret only; the escape hatch for stuck sessions.
    pub async fn admin_kick(&self, password: &str) -> Result<StatusView, AppError> {
        if !bool::from(password.as_bytes().ct_eq(self.admin_password.as_bytes())) {
            let status = self.status().await?;
            return Err(AppError::Unauthorized(
                "Invalid password".to_string(),
                status,
            ));
        }

        let now = Self::now();
        let current = session_repo::current_active_session(&self.pool, now).await?;
        let Some(current) = current else {
            return Err(AppError::NotFound(
                "No active session found".to_string(),
                StatusView::vacant(),
            ));
        };

        // A false here means the session ended concurrently (checkout or
        // sweep); the stall is free either way, so report success.
        let _ = session_repo::end_session(&self.pool, current.id, None).await?;

        let status = self.status().await?;
        tracing::info!(session_id = current.id, "Session kicked by admin");
        self.notifier.broadcast(EventKind::Checkout, status.clone());
        self.notifier.broadcast(EventKind::Status, status.clone());
        Ok(status)
    }

    /// Read-only projection of the current occupancy state.
    pub async fn status(&self) -> Result<StatusView, AppError> {
        let now = Self::now();
        let current = session_repo::current_active_session(&self.pool, now).await?;
        Ok(StatusView::project(current.as_ref(), now))
    }

    /// Flips every stale session to inactive and, if any were flipped,
    /// pushes a status refresh to subscribers. Called from the periodic
    /// sweep task.
    pub async fn sweep(&self) -> Result<u64, AppError> {
        let now = Self::now();
        let expired = session_repo::expire_stale_sessions(&self.pool, now).await?;
        if expired > 0 {
            let status = self.status().await?;
            self.notifier.broadcast(EventKind::Status, status);
        }
        Ok(expired)
    }
}

fn generate_device_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(DEVICE_TOKEN_LEN)
        .map(char::from)
        .collect()
}
