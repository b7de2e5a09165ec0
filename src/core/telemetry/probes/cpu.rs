//! CPU usage, core counts and frequency.

use std::time::Duration;
use sysinfo::{CpuRefreshKind, RefreshKind, System};

use super::Probe;
use crate::core::telemetry::{Family, Snapshot};
use crate::error::Result;

pub struct CpuProbe {
    system: System,
}

impl CpuProbe {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing().with_cpu(CpuRefreshKind::everything());
        Self {
            system: System::new_with_specifics(refresh_kind),
        }
    }
}

impl Default for CpuProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for CpuProbe {
    fn family(&self) -> Family {
        Family::Cpu
    }

    fn sample(&mut self) -> Result<Snapshot> {
        self.system.refresh_cpu_all();

        let cpus = self.system.cpus();
        let frequencies: Vec<u64> = cpus.iter().map(|cpu| cpu.frequency()).collect();
        let current = if frequencies.is_empty() {
            0
        } else {
            frequencies.iter().sum::<u64>() / frequencies.len() as u64
        };

        let frequency = serde_json::json!({
            "current": current,
            "min": frequencies.iter().min().copied().unwrap_or(0),
            "max": frequencies.iter().max().copied().unwrap_or(0),
        });

        let per_cpu: Vec<f64> = cpus.iter().map(|cpu| cpu.cpu_usage() as f64).collect();

        Ok(Snapshot::new()
            .with("percent", self.system.global_cpu_usage() as f64)
            .with(
                "physical_cores",
                System::physical_core_count().unwrap_or(0) as u64,
            )
            .with("logical_cores", cpus.len() as u64)
            .with("frequency", frequency)
            .with("per_cpu", per_cpu)
            .with(
                "brand",
                cpus.first()
                    .map(|c| c.brand().trim().to_string())
                    .unwrap_or_default(),
            ))
    }

    fn warmup(&self) -> Duration {
        sysinfo::MINIMUM_CPU_UPDATE_INTERVAL
    }
}
