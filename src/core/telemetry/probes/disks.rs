//! Mounted partitions and their usage.

use serde_json::{json, Value};
use sysinfo::Disks;

use super::{percent_of, Probe};
use crate::core::telemetry::{Family, Snapshot};
use crate::error::Result;

pub struct DiskProbe {
    disks: Disks,
}

impl DiskProbe {
    pub fn new() -> Self {
        Self {
            disks: Disks::new_with_refreshed_list(),
        }
    }
}

impl Default for DiskProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for DiskProbe {
    fn family(&self) -> Family {
        Family::Disk
    }

    fn sample(&mut self) -> Result<Snapshot> {
        self.disks.refresh(true);

        let partitions: Vec<Value> = self
            .disks
            .iter()
            .map(|disk| {
                let total = disk.total_space();
                let free = disk.available_space();
                let used = total.saturating_sub(free);

                json!({
                    "device": disk.name().to_string_lossy(),
                    "mountpoint": disk.mount_point().to_string_lossy(),
                    "fstype": disk.file_system().to_string_lossy(),
                    "total": total,
                    "used": used,
                    "free": free,
                    "percent": percent_of(used, total),
                })
            })
            .collect();

        Ok(Snapshot::new().with("partitions", partitions))
    }
}
