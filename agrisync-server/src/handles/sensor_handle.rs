use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use agrisync_api::{SensorReading, SensorStore};

use crate::errors::ApiError;
use crate::services::dashboard::{ChartPoint, DashboardState};

#[derive(Clone)]
pub struct SensorState {
    pub store: Arc<dyn SensorStore>,
    pub dashboard: Arc<DashboardState>,
    pub history_limit: usize,
}

/// Latest persisted reading. When the store has nothing or cannot be reached,
/// fall back to the live in-memory snapshot.
pub async fn get_sensor_data(State(state): State<SensorState>) -> Json<SensorReading> {
    match state.store.fetch_latest().await {
        Ok(Some(reading)) => Json(reading),
        Ok(None) => Json(state.dashboard.snapshot().await),
        Err(e) => {
            tracing::warn!("falling back to in-memory sensor data: {}", e);

            Json(state.dashboard.snapshot().await)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

pub async fn get_historical_data(
    Query(query): Query<HistoryQuery>,
    State(state): State<SensorState>,
) -> Result<Json<Vec<SensorReading>>, ApiError> {
    let limit = query.limit.unwrap_or(state.history_limit);

    let history = state.store.fetch_history(limit).await?;

    Ok(Json(history))
}

pub async fn get_chart_data(State(state): State<SensorState>) -> Json<Vec<ChartPoint>> {
    Json(state.dashboard.chart().await)
}
