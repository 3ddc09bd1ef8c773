use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::broadcast;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// One transient operator notification, the toast analog.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Fan-out bus for operator notifications. Senders never block; a send with
/// no listeners is dropped silently.
pub struct NotificationService {
    sender: broadcast::Sender<Notification>,
}

impl NotificationService {
    pub fn new() -> Self {
        let (sender, _receiver) = broadcast::channel(100);

        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn notify<T, M>(&self, severity: Severity, title: T, message: M)
    where
        T: Into<String>,
        M: Into<String>,
    {
        let notification = Notification {
            severity,
            title: title.into(),
            message: message.into(),
            timestamp: OffsetDateTime::now_utc(),
        };

        if self.sender.send(notification).is_err() {
            tracing::debug!("notification dropped, no listeners");
        }
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}
