use std::collections::VecDeque;

use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use agrisync_api::{Control, SensorReading};

use crate::simulate;

pub const DEFAULT_WATER_LEVEL: f64 = 6.0;
pub const DEFAULT_TEMPERATURE: f64 = 84.0;
pub const DEFAULT_HUMIDITY: f64 = 62.0;

/// Points kept in the rolling temperature/humidity chart window.
pub const CHART_WINDOW: usize = 9;
const CHART_SEED_STEP_MINUTES: i64 = 15;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    pub temperature: f64,
    pub humidity: f64,
}

#[derive(Debug)]
struct Inner {
    temperature: f64,
    humidity: f64,
    water_level: f64,
    drip: bool,
    sprinkler: bool,
    chart: VecDeque<ChartPoint>,
}

/// Live display state of the monitor: current gauge values, the two control
/// switches and the rolling chart window.
pub struct DashboardState {
    inner: RwLock<Inner>,
}

impl DashboardState {
    /// Starts from the display defaults with a freshly seeded chart window.
    pub fn new() -> Self {
        let mut rng = rand::rng();
        let now = OffsetDateTime::now_utc();

        let chart = (0..CHART_WINDOW)
            .map(|i| ChartPoint {
                time: now
                    - time::Duration::minutes(
                        CHART_SEED_STEP_MINUTES * (CHART_WINDOW - 1 - i) as i64,
                    ),
                temperature: simulate::temperature(&mut rng),
                humidity: simulate::humidity(&mut rng),
            })
            .collect();

        Self {
            inner: RwLock::new(Inner {
                temperature: DEFAULT_TEMPERATURE,
                humidity: DEFAULT_HUMIDITY,
                water_level: DEFAULT_WATER_LEVEL,
                drip: false,
                sprinkler: false,
                chart,
            }),
        }
    }

    /// Current values as a reading, stamped now.
    pub async fn snapshot(&self) -> SensorReading {
        let inner = self.inner.read().await;

        SensorReading {
            timestamp: OffsetDateTime::now_utc(),
            temperature: inner.temperature,
            humidity: inner.humidity,
            water_level: inner.water_level,
            drip: inner.drip,
            sprinkler: inner.sprinkler,
        }
    }

    /// The inputs each poll tick feeds into the simulation: live water level
    /// and the latest control flags.
    pub async fn poll_inputs(&self) -> (f64, bool, bool) {
        let inner = self.inner.read().await;

        (inner.water_level, inner.drip, inner.sprinkler)
    }

    /// Apply a fresh tick reading and shift the chart window.
    pub async fn apply_reading(&self, reading: &SensorReading) {
        let mut inner = self.inner.write().await;

        inner.temperature = reading.temperature;
        inner.humidity = reading.humidity;
        inner.water_level = reading.water_level;

        inner.chart.push_back(ChartPoint {
            time: reading.timestamp,
            temperature: reading.temperature,
            humidity: reading.humidity,
        });
        while inner.chart.len() > CHART_WINDOW {
            inner.chart.pop_front();
        }
    }

    /// Initialize from the last persisted reading. Control flags are adopted
    /// only while both switches are still at their untoggled default.
    pub async fn adopt_persisted(&self, reading: &SensorReading) {
        let mut inner = self.inner.write().await;

        inner.temperature = reading.temperature;
        inner.humidity = reading.humidity;
        inner.water_level = reading.water_level;

        if !inner.drip && !inner.sprinkler {
            inner.drip = reading.drip;
            inner.sprinkler = reading.sprinkler;
        }
    }

    pub async fn set_control(&self, control: Control, is_on: bool) {
        let mut inner = self.inner.write().await;

        match control {
            Control::Drip => inner.drip = is_on,
            Control::Sprinkler => inner.sprinkler = is_on,
        }
    }

    pub async fn control(&self, control: Control) -> bool {
        let inner = self.inner.read().await;

        match control {
            Control::Drip => inner.drip,
            Control::Sprinkler => inner.sprinkler,
        }
    }

    pub async fn controls(&self) -> (bool, bool) {
        let inner = self.inner.read().await;

        (inner.drip, inner.sprinkler)
    }

    pub async fn chart(&self) -> Vec<ChartPoint> {
        self.inner.read().await.chart.iter().cloned().collect()
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
