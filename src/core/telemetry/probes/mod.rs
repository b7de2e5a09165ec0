//! Per-family metric probes.
//!
//! Each probe owns the sysinfo handles it needs and turns one refresh into
//! a [`Snapshot`] using the key schema the renderers read.

mod battery;
mod cpu;
mod disks;
mod memory;
mod network;

pub use battery::BatteryProbe;
pub use cpu::CpuProbe;
pub use disks::DiskProbe;
pub use memory::MemoryProbe;
pub use network::NetworkProbe;

use std::sync::Arc;
use std::time::Duration;

use super::snapshot::{Family, Snapshot};
use crate::error::Result;

/// A source of snapshots for one family.
pub trait Probe: Send {
    fn family(&self) -> Family;

    /// Take one reading.
    fn sample(&mut self) -> Result<Snapshot>;

    /// Delay before the first reading is meaningful (CPU usage needs two
    /// refreshes spaced apart).
    fn warmup(&self) -> Duration {
        Duration::ZERO
    }
}

/// Builds a fresh probe each time a sampler starts.
pub type ProbeFactory = Arc<dyn Fn(Family) -> Box<dyn Probe> + Send + Sync>;

/// Probe backed by the host system for the given family.
pub fn system_probe(family: Family) -> Box<dyn Probe> {
    match family {
        Family::Cpu => Box::new(CpuProbe::new()),
        Family::Ram => Box::new(MemoryProbe::new()),
        Family::Disk => Box::new(DiskProbe::new()),
        Family::Battery => Box::new(BatteryProbe::new()),
        Family::Network => Box::new(NetworkProbe::new()),
    }
}

pub fn system_probe_factory() -> ProbeFactory {
    Arc::new(system_probe)
}

/// Sample a probe, folding failures into an error snapshot and stamping the
/// sample time.
pub fn sample_or_error(probe: &mut dyn Probe) -> Snapshot {
    let mut snapshot = match probe.sample() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::debug!("{} probe failed: {}", probe.family(), e);
            Snapshot::error(e.to_string())
        }
    };
    snapshot.insert("timestamp", chrono::Utc::now().timestamp());
    snapshot
}

fn percent_of(part: u64, total: u64) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
