pub mod control_service;
pub mod dashboard;
pub mod notification_service;
pub mod telemetry_service;

pub use control_service::ControlService;
pub use dashboard::{ChartPoint, DashboardState};
pub use notification_service::{Notification, NotificationService, Severity};
pub use telemetry_service::TelemetryService;
