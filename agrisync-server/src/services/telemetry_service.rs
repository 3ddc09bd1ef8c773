use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use agrisync_api::SensorStore;

use crate::services::dashboard::DashboardState;
use crate::simulate;

/// Loads the last persisted reading once, then polls on a fixed interval:
/// synthesize a reading, apply it to the dashboard, persist it remotely.
pub struct TelemetryService {
    store: Arc<dyn SensorStore>,
    dashboard: Arc<DashboardState>,
    interval: Duration,
}

impl TelemetryService {
    pub fn new(
        store: Arc<dyn SensorStore>,
        dashboard: Arc<DashboardState>,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            dashboard,
            interval,
        }
    }

    /// One-shot initialization from the store. Any failure keeps the
    /// in-memory defaults; nothing is retried or surfaced to the operator.
    pub async fn load_initial(&self) {
        match self.store.fetch_latest().await {
            Ok(Some(reading)) => {
                tracing::debug!("initializing dashboard from reading at {}", reading.timestamp);
                self.dashboard.adopt_persisted(&reading).await;
            }
            Ok(None) => {
                tracing::debug!("no persisted readings yet, keeping defaults");
            }
            Err(e) => {
                tracing::error!("failed to fetch latest reading: {}", e);
            }
        }
    }

    /// Load once, then tick forever. Spawn this; dropping the task at
    /// teardown stops the timer but leaves in-flight writes running.
    pub async fn run(self: Arc<Self>) {
        self.load_initial().await;

        let mut ticker = tokio::time::interval(self.interval);
        // the interval fires immediately; the first reading belongs one period out
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    /// One poll tick. The dashboard update is synchronous; the persistence
    /// write runs detached so a slow store never delays the next tick, and a
    /// failed write never rolls the local update back.
    pub async fn tick(&self) -> JoinHandle<()> {
        let (water_level, drip, sprinkler) = self.dashboard.poll_inputs().await;
        let reading = simulate::next_reading(water_level, drip, sprinkler);

        self.dashboard.apply_reading(&reading).await;

        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(e) = store.save(&reading).await {
                tracing::error!("failed to persist reading: {}", e);
            }
        })
    }
}
