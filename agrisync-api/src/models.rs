use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One field sensor sample, produced every poll tick and persisted as-is.
/// Superseded by the next reading; never updated or deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Temperature in Fahrenheit
    pub temperature: f64,
    /// Relative humidity %
    pub humidity: f64,
    /// Tank water level, clamped to 1..=10
    pub water_level: f64,
    pub drip: bool,
    pub sprinkler: bool,
}

/// A named irrigation actuator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Drip,
    Sprinkler,
}

impl Control {
    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Drip => "drip",
            Control::Sprinkler => "sprinkler",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted on/off state of one control. Last write wins, no versioning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlState {
    pub is_on: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}
