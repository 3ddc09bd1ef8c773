pub mod models;
pub mod store;

pub use models::{Control, ControlState, SensorReading};
pub use store::{SensorStore, StoreError};
