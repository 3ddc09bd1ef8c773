use std::sync::Arc;

use agrisync_api::{Control, SensorStore, StoreError};

use crate::services::dashboard::DashboardState;
use crate::services::notification_service::{NotificationService, Severity};

/// Bridges operator toggles to the remote store. The write goes remote first;
/// the local switch only flips once the store has accepted it.
pub struct ControlService {
    store: Arc<dyn SensorStore>,
    dashboard: Arc<DashboardState>,
    notifier: Arc<NotificationService>,
}

impl ControlService {
    pub fn new(
        store: Arc<dyn SensorStore>,
        dashboard: Arc<DashboardState>,
        notifier: Arc<NotificationService>,
    ) -> Self {
        Self {
            store,
            dashboard,
            notifier,
        }
    }

    /// On store failure the attempted change is discarded: local state stays
    /// untouched, the operator gets an error notification, no retry.
    pub async fn toggle(&self, control: Control, is_on: bool) -> Result<(), StoreError> {
        match self.store.set_control(control, is_on).await {
            Ok(()) => {
                self.dashboard.set_control(control, is_on).await;
                self.notifier.notify(
                    Severity::Info,
                    activation_title(control, is_on),
                    activation_message(control, is_on),
                );

                tracing::info!("{} set to {}", control, if is_on { "on" } else { "off" });

                Ok(())
            }
            Err(e) => {
                tracing::error!("{} toggle failed: {}", control, e);
                self.notifier
                    .notify(Severity::Error, "Error", failure_message(control));

                Err(e)
            }
        }
    }
}

fn activation_title(control: Control, is_on: bool) -> &'static str {
    match (control, is_on) {
        (Control::Drip, true) => "Drip Irrigation Activated",
        (Control::Drip, false) => "Drip Irrigation Deactivated",
        (Control::Sprinkler, true) => "Sprinkler Activated",
        (Control::Sprinkler, false) => "Sprinkler Deactivated",
    }
}

fn activation_message(control: Control, is_on: bool) -> &'static str {
    match (control, is_on) {
        (Control::Drip, true) => "System is now active",
        (Control::Drip, false) => "System turned off",
        (Control::Sprinkler, true) => "Sprinkler system is now active",
        (Control::Sprinkler, false) => "Sprinkler system turned off",
    }
}

fn failure_message(control: Control) -> &'static str {
    match control {
        Control::Drip => "Failed to update drip irrigation system",
        Control::Sprinkler => "Failed to update sprinkler system",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::stores::MemoryStore;

    struct Fixture {
        store: Arc<MemoryStore>,
        dashboard: Arc<DashboardState>,
        notifier: Arc<NotificationService>,
        service: ControlService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let dashboard = Arc::new(DashboardState::new());
        let notifier = Arc::new(NotificationService::new());
        let service = ControlService::new(store.clone(), dashboard.clone(), notifier.clone());

        Fixture {
            store,
            dashboard,
            notifier,
            service,
        }
    }

    #[tokio::test]
    async fn successful_toggle_updates_store_then_local_state() {
        let f = fixture();
        let mut notifications = f.notifier.subscribe();

        f.service.toggle(Control::Sprinkler, true).await.unwrap();

        assert!(f.store.control(Control::Sprinkler).await.unwrap().is_on);
        assert!(f.dashboard.control(Control::Sprinkler).await);

        let notification = notifications.recv().await.unwrap();
        assert_eq!(notification.severity, Severity::Info);
        assert_eq!(notification.title, "Sprinkler Activated");
    }

    #[tokio::test]
    async fn failed_toggle_leaves_local_state_unchanged() {
        let f = fixture();
        let mut notifications = f.notifier.subscribe();

        f.store.fail_writes(true);
        let result = f.service.toggle(Control::Drip, true).await;

        assert!(result.is_err());
        assert!(!f.dashboard.control(Control::Drip).await);
        assert!(f.store.control(Control::Drip).await.is_none());

        let notification = notifications.recv().await.unwrap();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.message, "Failed to update drip irrigation system");
    }

    #[tokio::test]
    async fn deactivation_uses_turned_off_wording() {
        let f = fixture();
        let mut notifications = f.notifier.subscribe();

        f.service.toggle(Control::Drip, true).await.unwrap();
        f.service.toggle(Control::Drip, false).await.unwrap();

        notifications.recv().await.unwrap();
        let notification = notifications.recv().await.unwrap();
        assert_eq!(notification.title, "Drip Irrigation Deactivated");
        assert_eq!(notification.message, "System turned off");
        assert!(!f.dashboard.control(Control::Drip).await);
    }
}
