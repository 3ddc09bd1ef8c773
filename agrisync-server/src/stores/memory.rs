use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use agrisync_api::{Control, ControlState, SensorReading, SensorStore, StoreError};

/// In-memory stand-in for the realtime store, used by tests and local runs.
/// Read/write failure injection exercises every error path without a network.
#[derive(Default)]
pub struct MemoryStore {
    readings: RwLock<Vec<SensorReading>>,
    controls: RwLock<HashMap<Control, ControlState>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn reading_count(&self) -> usize {
        self.readings.read().await.len()
    }

    pub async fn control(&self, control: Control) -> Option<ControlState> {
        self.controls.read().await.get(&control).cloned()
    }
}

#[async_trait]
impl SensorStore for MemoryStore {
    async fn fetch_latest(&self) -> Result<Option<SensorReading>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::request("injected read failure"));
        }

        let readings = self.readings.read().await;

        Ok(readings
            .iter()
            .max_by_key(|reading| reading.timestamp)
            .cloned())
    }

    async fn save(&self, reading: &SensorReading) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::request("injected write failure"));
        }

        let mut readings = self.readings.write().await;

        // Same timestamp key overwrites, as the keyed store would.
        readings.retain(|existing| existing.timestamp != reading.timestamp);
        readings.push(reading.clone());

        Ok(())
    }

    async fn fetch_history(&self, limit: usize) -> Result<Vec<SensorReading>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::request("injected read failure"));
        }

        let mut readings = self.readings.read().await.clone();
        readings.sort_by_key(|reading| reading.timestamp);

        let skip = readings.len().saturating_sub(limit);

        Ok(readings.split_off(skip))
    }

    async fn set_control(&self, control: Control, is_on: bool) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::request("injected write failure"));
        }

        let state = ControlState {
            is_on,
            timestamp: OffsetDateTime::now_utc(),
        };

        self.controls.write().await.insert(control, state);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading_at(epoch: i64, temperature: f64) -> SensorReading {
        SensorReading {
            timestamp: OffsetDateTime::from_unix_timestamp(epoch).unwrap(),
            temperature,
            humidity: 62.0,
            water_level: 6.0,
            drip: false,
            sprinkler: false,
        }
    }

    #[tokio::test]
    async fn latest_picks_newest_timestamp_regardless_of_insert_order() {
        let store = MemoryStore::new();

        store.save(&reading_at(200, 71.0)).await.unwrap();
        store.save(&reading_at(100, 70.0)).await.unwrap();

        let latest = store.fetch_latest().await.unwrap().unwrap();
        assert_eq!(latest.temperature, 71.0);
    }

    #[tokio::test]
    async fn history_is_ascending_and_limited() {
        let store = MemoryStore::new();

        for i in 0..5 {
            store.save(&reading_at(i * 10, 70.0 + i as f64)).await.unwrap();
        }

        let history = store.fetch_history(3).await.unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history[0].temperature, 72.0);
        assert_eq!(history[2].temperature, 74.0);
    }

    #[tokio::test]
    async fn same_timestamp_key_overwrites() {
        let store = MemoryStore::new();

        store.save(&reading_at(100, 70.0)).await.unwrap();
        store.save(&reading_at(100, 85.0)).await.unwrap();

        assert_eq!(store.reading_count().await, 1);
        let latest = store.fetch_latest().await.unwrap().unwrap();
        assert_eq!(latest.temperature, 85.0);
    }

    #[tokio::test]
    async fn injected_failures_surface_as_store_errors() {
        let store = MemoryStore::new();

        store.fail_writes(true);
        assert!(store.save(&reading_at(0, 70.0)).await.is_err());
        assert!(store.set_control(Control::Drip, true).await.is_err());

        store.fail_writes(false);
        store.save(&reading_at(0, 70.0)).await.unwrap();

        store.fail_reads(true);
        assert!(store.fetch_latest().await.is_err());
        assert!(store.fetch_history(10).await.is_err());
    }
}
