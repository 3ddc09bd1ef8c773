use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;

use agrisync_api::{Control, ControlState, SensorReading, SensorStore, StoreError};

use crate::configs::Store as StoreConfig;

/// REST adapter for a Firebase-style realtime database.
///
/// Readings live under `sensors/<epoch_ms>`, control documents under
/// `controls/<name>`. Queries order by the `timestamp` child and take the last
/// N entries, which is how the store resolves "latest".
pub struct FirebaseStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl FirebaseStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.database_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        }
    }

    fn node_url(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path)
    }

    fn auth_query(&self) -> Vec<(&'static str, String)> {
        self.api_key
            .iter()
            .map(|key| ("auth", key.clone()))
            .collect()
    }

    async fn fetch_last(&self, limit: usize) -> Result<Vec<SensorReading>, StoreError> {
        let response = self
            .client
            .get(self.node_url("sensors"))
            .query(&[
                ("orderBy", "\"timestamp\"".to_string()),
                ("limitToLast", limit.to_string()),
            ])
            .query(&self.auth_query())
            .send()
            .await
            .map_err(|e| StoreError::request(e.to_string()))?
            .error_for_status()
            .map_err(|e| StoreError::rejected(e.to_string()))?;

        // The store answers with a key -> reading object, or `null` when the
        // node does not exist yet.
        let snapshot: Option<HashMap<String, SensorReading>> = response
            .json()
            .await
            .map_err(|e| StoreError::decode(e.to_string()))?;

        let mut readings: Vec<SensorReading> =
            snapshot.unwrap_or_default().into_values().collect();
        readings.sort_by_key(|reading| reading.timestamp);

        Ok(readings)
    }

    async fn put<T: serde::Serialize>(&self, path: &str, body: &T) -> Result<(), StoreError> {
        self.client
            .put(self.node_url(path))
            .query(&self.auth_query())
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::request(e.to_string()))?
            .error_for_status()
            .map_err(|e| StoreError::rejected(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SensorStore for FirebaseStore {
    async fn fetch_latest(&self) -> Result<Option<SensorReading>, StoreError> {
        Ok(self.fetch_last(1).await?.pop())
    }

    async fn save(&self, reading: &SensorReading) -> Result<(), StoreError> {
        let key = reading.timestamp.unix_timestamp_nanos() / 1_000_000;

        self.put(&format!("sensors/{key}"), reading).await
    }

    async fn fetch_history(&self, limit: usize) -> Result<Vec<SensorReading>, StoreError> {
        self.fetch_last(limit).await
    }

    async fn set_control(&self, control: Control, is_on: bool) -> Result<(), StoreError> {
        let state = ControlState {
            is_on,
            timestamp: OffsetDateTime::now_utc(),
        };

        self.put(&format!("controls/{control}"), &state).await
    }
}
