// Core business logic module

pub mod config;
pub mod telemetry;

// Re-export commonly used items
pub use config::Config;
pub use telemetry::{Family, MonitoringClient, MonitoringService, Snapshot};
