use std::{env, fs};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to merge settings: {0}")]
    Merge(#[from] serde_json::Error),

    #[error("{0}")]
    Message(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

/// Connection values for the realtime store. The database URL is required at
/// startup; a missing key only matters for stores with auth enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub database_url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poller {
    pub interval_secs: u64,
    pub history_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub store: Store,
    pub poller: Poller,
}

impl Settings {
    pub fn new() -> Result<Self, SettingsError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let base = fs::read_to_string("configs/default.toml")?;
        let overlay = fs::read_to_string(format!("configs/{run_mode}.toml")).ok();

        let mut settings = Self::parse(&base, overlay.as_deref())?;

        if let Ok(url) = env::var("AGRISYNC_STORE_DATABASE_URL") {
            settings.store.database_url = url;
        }
        if let Ok(key) = env::var("AGRISYNC_STORE_API_KEY") {
            settings.store.api_key = Some(key);
        }

        settings.ensure_store_configured()?;

        Ok(settings)
    }

    fn parse(base: &str, overlay: Option<&str>) -> Result<Self, SettingsError> {
        let base: toml::Value = toml::from_str(base)?;

        match overlay {
            Some(overlay) => Self::merge(base, toml::from_str::<toml::Value>(overlay)?),
            None => Ok(base.try_into()?),
        }
    }

    /// Shallow section merge: a section present in `right` replaces the whole
    /// section from `left`.
    pub fn merge<L, R, T>(left: L, right: R) -> Result<T, SettingsError>
    where
        L: Serialize,
        R: Serialize,
        T: Serialize + DeserializeOwned,
    {
        let mut left_map = serde_json::to_value(&left)?
            .as_object()
            .map(|map| map.to_owned())
            .ok_or(SettingsError::Message(
                "Left settings value is not an object".into(),
            ))?;

        let mut right_map = serde_json::to_value(&right)?
            .as_object()
            .map(|map| map.to_owned())
            .ok_or(SettingsError::Message(
                "Right settings value is not an object".into(),
            ))?;

        right_map.retain(|_, v| !v.is_null());
        left_map.extend(right_map);

        let value = serde_json::to_value(&left_map)?;

        Ok(serde_json::from_value(value)?)
    }

    pub(crate) fn ensure_store_configured(&self) -> Result<(), SettingsError> {
        if self.store.database_url.is_empty() {
            return Err(SettingsError::Message(
                "store.database_url must be set (file or AGRISYNC_STORE_DATABASE_URL)".into(),
            ));
        }

        Ok(())
    }
}
