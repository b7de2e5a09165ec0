use sysinfo::{MemoryRefreshKind, RefreshKind, System};

use super::{percent_of, Probe};
use crate::core::telemetry::{Family, Snapshot};
use crate::error::Result;

/// Physical memory and swap usage.
pub struct MemoryProbe {
    system: System,
}

impl MemoryProbe {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing().with_memory(MemoryRefreshKind::everything());
        Self {
            system: System::new_with_specifics(refresh_kind),
        }
    }
}

impl Default for MemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for MemoryProbe {
    fn family(&self) -> Family {
        Family::Ram
    }

    fn sample(&mut self) -> Result<Snapshot> {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        let available = self.system.available_memory();
        let swap_total = self.system.total_swap();
        let swap_used = self.system.used_swap();

        Ok(Snapshot::new()
            .with("total", total)
            .with("available", available)
            .with("used", self.system.used_memory())
            .with("percent", percent_of(total.saturating_sub(available), total))
            .with("swap_total", swap_total)
            .with("swap_used", swap_used)
            .with("swap_percent", percent_of(swap_used, swap_total)))
    }
}
