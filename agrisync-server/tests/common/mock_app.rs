use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;

use agrisync_api::SensorStore;
use agrisync_server::handles::{
    ControlState, SSEState, SensorState, get_chart_data, get_controls, get_historical_data,
    get_sensor_data, sse_handler, update_control,
};
use agrisync_server::services::{
    ControlService, DashboardState, NotificationService, TelemetryService,
};
use agrisync_server::stores::MemoryStore;

pub struct MockApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub dashboard: Arc<DashboardState>,
    pub notifier: Arc<NotificationService>,
    pub telemetry: Arc<TelemetryService>,
}

impl MockApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let store_dyn: Arc<dyn SensorStore> = store.clone();

        let dashboard = Arc::new(DashboardState::new());
        let notifier = Arc::new(NotificationService::new());

        let control_service = Arc::new(ControlService::new(
            store_dyn.clone(),
            dashboard.clone(),
            notifier.clone(),
        ));
        let telemetry = Arc::new(TelemetryService::new(
            store_dyn.clone(),
            dashboard.clone(),
            Duration::from_secs(5),
        ));

        let sensors = Router::new()
            .route("/sensor-data", get(get_sensor_data))
            .route("/historical-data", get(get_historical_data))
            .route("/chart-data", get(get_chart_data))
            .with_state(SensorState {
                store: store_dyn.clone(),
                dashboard: dashboard.clone(),
                history_limit: 24,
            });

        let controls = Router::new()
            .route("/control", get(get_controls).post(update_control))
            .with_state(ControlState {
                control_service: control_service.clone(),
                dashboard: dashboard.clone(),
            });

        let events = Router::new().route("/events", get(sse_handler)).with_state(SSEState {
            notifier: notifier.clone(),
        });

        let router = Router::new().nest("/api", sensors.merge(controls).merge(events));

        Self {
            router,
            store,
            dashboard,
            notifier,
            telemetry,
        }
    }
}
