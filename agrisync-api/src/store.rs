use async_trait::async_trait;

use crate::models::{Control, SensorReading};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    Request(String),

    #[error("Store returned unexpected payload: {0}")]
    Decode(String),

    #[error("Store rejected the operation: {0}")]
    Rejected(String),
}

impl StoreError {
    pub fn request<S: Into<String>>(message: S) -> Self {
        Self::Request(message.into())
    }

    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode(message.into())
    }

    pub fn rejected<S: Into<String>>(message: S) -> Self {
        Self::Rejected(message.into())
    }
}

/// Remote realtime store the monitor reads from and writes to.
///
/// Readings are keyed by timestamp at the store; concurrent writes are allowed
/// and resolve last-write-wins. None of the operations retry.
#[async_trait]
pub trait SensorStore: Send + Sync {
    /// The most recent persisted reading, if any exists yet.
    async fn fetch_latest(&self) -> Result<Option<SensorReading>, StoreError>;

    /// Persist one reading under its timestamp key.
    async fn save(&self, reading: &SensorReading) -> Result<(), StoreError>;

    /// Up to `limit` most recent readings, ascending by timestamp.
    async fn fetch_history(&self, limit: usize) -> Result<Vec<SensorReading>, StoreError>;

    /// Overwrite the persisted on/off state of one control.
    async fn set_control(&self, control: Control, is_on: bool) -> Result<(), StoreError>;
}
