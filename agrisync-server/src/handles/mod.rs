pub mod control_handle;
pub mod sensor_handle;
pub mod sse_handle;

pub use control_handle::*;
pub use sensor_handle::*;
pub use sse_handle::*;
