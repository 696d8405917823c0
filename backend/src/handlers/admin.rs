use axum::{extract::State, Json};

use crate::error::AppError;
use crate::models::session::{ActionResponse, KickRequest};
use crate::state::AppState;

/// Force-ends the active session. Authorization is the shared admin secret
/// alone; no ownership token is required on this path.
pub async fn kick(
    State(state): State<AppState>,
    Json(payload): Json<KickRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let status = state.occupancy.admin_kick(&payload.password).await?;
    Ok(Json(ActionResponse {
        success: true,
        message: "User kicked successfully".to_string(),
        status,
    }))
}
