// Long-running engine services
pub mod polling_driver;

pub use polling_driver::{DriverHandle, DriverState, PollingDriver, RetryPolicy};
