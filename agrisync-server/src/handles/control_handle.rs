use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::json;

use agrisync_api::Control;

use crate::errors::ApiError;
use crate::services::control_service::ControlService;
use crate::services::dashboard::DashboardState;

#[derive(Clone)]
pub struct ControlState {
    pub control_service: Arc<ControlService>,
    pub dashboard: Arc<DashboardState>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlRequest {
    pub control: Control,
    pub is_on: bool,
}

pub async fn get_controls(State(state): State<ControlState>) -> Json<serde_json::Value> {
    let (drip, sprinkler) = state.dashboard.controls().await;

    Json(json!({ "drip": drip, "sprinkler": sprinkler }))
}

pub async fn update_control(
    State(state): State<ControlState>,
    Json(request): Json<ControlRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .control_service
        .toggle(request.control, request.is_on)
        .await?;

    Ok(Json(json!({ "status": "success", "message": "Settings updated" })))
}
