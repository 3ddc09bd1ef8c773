mod settings;

pub use settings::{Logger, Poller, Server, Settings, SettingsError, Store};
