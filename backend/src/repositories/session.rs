use sqlx::SqlitePool;

use crate::models::session::Session;

/// Returns the active, unexpired session, if any.
///
/// A row whose `expires_at` has passed is treated as absent even when the
/// background sweep has not flipped it yet (lazy-expiry read).
pub async fn current_active_session(
    pool: &SqlitePool,
    now: i64,
) -> Result<Option<Session>, sqlx::Error> {
    sqlx::query_as::<_, Session>(
        r#"
        SELECT id, username, device_token, check_in_time, expires_at, active
        FROM sessions
        WHERE active = 1 AND expires_at > ?
        ORDER BY check_in_time DESC
        LIMIT 1
        "#,
    )
    .bind(now)
    .fetch_optional(pool)
    .await
}

/// Inserts a new active session expiring `ttl_seconds` from `now`.
///
/// Precondition: the caller has verified that no active session exists,
/// under the same lock that serializes check-ins. This function does not
/// re-check the single-occupancy invariant.
pub async fn create_session(
    pool: &SqlitePool,
    username: Option<&str>,
    device_token: Option<&str>,
    now: i64,
    ttl_seconds: i64,
) -> Result<Session, sqlx::Error> {
    let expires_at = now + ttl_seconds;

    sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (username, device_token, check_in_time, expires_at, active)
        VALUES (?, ?, ?, ?, 1)
        RETURNING id, username, device_token, check_in_time, expires_at, active
        "#,
    )
    .bind(username)
    .bind(device_token)
    .bind(now)
    .bind(expires_at)
    .fetch_one(pool)
    .await
}

/// Deactivates a session and reports whether a row changed.
///
/// With a `device_token` the update only matches when the stored token is
/// equal (voluntary checkout); without one it matches on id alone (admin
/// kick). A second call on an already-inactive row is a no-op `false` —
/// callers treat that as "someone else already ended it", not an error.
pub async fn end_session(
    pool: &SqlitePool,
    session_id: i64,
    device_token: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = match device_token {
        Some(token) => {
            sqlx::query(
                r#"
                UPDATE sessions
                SET active = 0
                WHERE id = ? AND active = 1 AND device_token = ?
                "#,
            )
            .bind(session_id)
            .bind(token)
            .execute(pool)
            .await?
        }
        None => {
            sqlx::query(
                r#"
                UPDATE sessions
                SET active = 0
                WHERE id = ? AND active = 1
                "#,
            )
            .bind(session_id)
            .execute(pool)
            .await?
        }
    };

    Ok(result.rows_affected() > 0)
}

/// Deactivates every active session whose expiry has passed; returns the
/// number of rows flipped.
pub async fn expire_stale_sessions(pool: &SqlitePool, now: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE sessions
        SET active = 0
        WHERE active = 1 AND expires_at <= ?
        "#,
    )
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
