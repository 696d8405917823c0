use axum::{extract::State, Json};

use crate::error::AppError;
use crate::models::session::{ActionResponse, CheckinRequest, CheckinResponse, CheckoutRequest};
use crate::models::status::StatusView;
use crate::state::AppState;

pub async fn get_status(State(state): State<AppState>) -> Result<Json<StatusView>, AppError> {
    let status = state.occupancy.status().await?;
    Ok(Json(status))
}

pub async fn checkin(
    State(state): State<AppState>,
    Json(payload): Json<CheckinRequest>,
) -> Result<Json<CheckinResponse>, AppError> {
    let outcome = state.occupancy.check_in(payload.username).await?;
    Ok(Json(CheckinResponse {
        success: true,
        session: outcome.session,
        device_token: outcome.device_token,
        status: outcome.status,
    }))
}

pub async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let status = state.occupancy.check_out(payload.device_token).await?;
    Ok(Json(ActionResponse {
        success: true,
        message: "Checked out successfully".to_string(),
        status,
    }))
}
