//! Telemetry pipeline.
//!
//! Probes sample the system on background samplers owned by the
//! [`MonitoringService`]; snapshots cross to the UI thread through the
//! [`dispatch`] queue.

pub mod dispatch;
pub mod probes;
mod service;
mod snapshot;

pub use dispatch::{DispatchQueue, Dispatcher, StatusHandle, UiMessage};
pub use probes::{system_probe, system_probe_factory, Probe, ProbeFactory};
pub use service::{MonitoringClient, MonitoringService, SnapshotHandler};
pub use snapshot::{Family, Snapshot};
