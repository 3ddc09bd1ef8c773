use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use agrisync_api::SensorStore;

use crate::configs::Settings;
use crate::handles::*;
use crate::services::{ControlService, DashboardState, NotificationService, TelemetryService};
use crate::stores::FirebaseStore;

pub async fn create_app(settings: &Arc<Settings>) -> Router {
    let store: Arc<dyn SensorStore> = Arc::new(FirebaseStore::new(settings.store.clone()));

    let dashboard = Arc::new(DashboardState::new());
    let notifier = Arc::new(NotificationService::new());

    let control_service = Arc::new(ControlService::new(
        store.clone(),
        dashboard.clone(),
        notifier.clone(),
    ));

    let telemetry = Arc::new(TelemetryService::new(
        store.clone(),
        dashboard.clone(),
        Duration::from_secs(settings.poller.interval_secs),
    ));
    // runs until process exit; in-flight writes are not awaited at teardown
    tokio::spawn(telemetry.run());

    let sensors = Router::new()
        .route("/sensor-data", get(get_sensor_data))
        .route("/historical-data", get(get_historical_data))
        .route("/chart-data", get(get_chart_data))
        .with_state(SensorState {
            store: store.clone(),
            dashboard: dashboard.clone(),
            history_limit: settings.poller.history_limit,
        });

    let controls = Router::new()
        .route("/control", get(get_controls).post(update_control))
        .with_state(ControlState {
            control_service: control_service.clone(),
            dashboard: dashboard.clone(),
        });

    let events = Router::new()
        .route("/events", get(sse_handler))
        .with_state(SSEState {
            notifier: notifier.clone(),
        });

    Router::new()
        .nest("/api", sensors.merge(controls).merge(events))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
