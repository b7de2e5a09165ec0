//! Live resource view.
//!
//! Callbacks registered with the monitoring client run on sampler threads and
//! only forward into the dispatch queue. The UI thread later hands each
//! snapshot to [`MonitoringTab::apply`].

use std::collections::BTreeMap;
use std::sync::Arc;

use super::panels::{
    render_battery, render_cpu, render_disk, render_network, render_ram, BatteryPanel, CpuPanel,
    DiskPanel, NetworkPanel, RamPanel,
};
use crate::core::telemetry::{
    Dispatcher, Family, MonitoringClient, Snapshot, SnapshotHandler, StatusHandle,
};
use crate::error::Result;

const HIGH_LOAD_PERCENT: f64 = 85.0;
const LOW_BATTERY_PERCENT: f64 = 20.0;

pub struct MonitoringTab {
    client: Box<dyn MonitoringClient>,
    status: StatusHandle,
    pub cpu: CpuPanel,
    pub ram: RamPanel,
    pub disk: DiskPanel,
    pub battery: BatteryPanel,
    pub network: NetworkPanel,
    /// Last error reported per family, cleared by the next good snapshot
    errors: BTreeMap<Family, String>,
}

impl MonitoringTab {
    /// Register one forwarding callback per family with `client`.
    pub fn new(mut client: Box<dyn MonitoringClient>, dispatcher: &Dispatcher) -> Result<Self> {
        for family in Family::ALL {
            let tx = dispatcher.clone();
            let handler: SnapshotHandler = Arc::new(move |snapshot| {
                if !tx.snapshot(family, snapshot) {
                    log::trace!("Dropped {} snapshot: UI queue closed", family);
                }
            });
            client.register_callback(family, handler)?;
        }

        Ok(Self {
            client,
            status: dispatcher.status_handle(),
            cpu: CpuPanel::default(),
            ram: RamPanel::default(),
            disk: DiskPanel::default(),
            battery: BatteryPanel::default(),
            network: NetworkPanel::default(),
            errors: BTreeMap::new(),
        })
    }

    pub fn start_monitoring(&mut self) -> Result<()> {
        self.client.start()?;
        log::info!("Resource monitoring started");
        self.status.set("Monitoring active");
        Ok(())
    }

    pub fn stop_monitoring(&mut self) -> Result<()> {
        self.client.stop()?;
        log::info!("Resource monitoring stopped");
        self.status.set("Monitoring stopped");
        Ok(())
    }

    /// Start or stop sampling. Returns whether monitoring is now active.
    pub fn toggle_monitoring(&mut self) -> Result<bool> {
        if self.client.is_running() {
            self.stop_monitoring()?;
        } else {
            self.start_monitoring()?;
        }
        Ok(self.client.is_running())
    }

    pub fn is_monitoring(&self) -> bool {
        self.client.is_running()
    }

    /// Summary of the latest readings with the likely bottlenecks, or `None`
    /// before the first CPU or memory sample arrived.
    pub fn performance_profile(&self) -> Option<String> {
        if self.cpu.percent.is_none() && self.ram.percent.is_none() {
            return None;
        }

        let mut report = String::new();
        report.push_str(&format!("CPU {}\n", self.cpu.usage_text()));
        report.push_str(&format!("  {}\n", self.cpu.cores_text()));
        report.push_str(&format!("Memory {}\n", self.ram.usage_text()));
        report.push_str(&format!("  {}\n", self.ram.available_text()));
        if self.battery.percent.is_some() {
            report.push_str(&format!(
                "Power {} ({})\n",
                self.battery.status_text(),
                self.battery.level_text()
            ));
        }

        let mut findings = Vec::new();
        if self.cpu.percent.is_some_and(|p| p >= HIGH_LOAD_PERCENT) {
            findings.push("CPU is saturated; look for runaway processes");
        }
        if self.ram.percent.is_some_and(|p| p >= HIGH_LOAD_PERCENT) {
            findings.push("Memory pressure is high; close unused applications");
        }
        let on_battery = self.battery.power_plugged == Some(false);
        if on_battery && self.battery.percent.is_some_and(|p| p < LOW_BATTERY_PERCENT) {
            findings.push("Battery is low; connect the charger");
        }
        if findings.is_empty() {
            findings.push("No bottleneck detected");
        }

        report.push_str("\nFindings:\n");
        for finding in findings {
            report.push_str(&format!("  - {}\n", finding));
        }
        Some(report)
    }

    pub fn error_for(&self, family: Family) -> Option<&str> {
        self.errors.get(&family).map(String::as_str)
    }

    /// Render one snapshot into its panel. Returns true when the panel
    /// changed; error snapshots and render failures leave it as it was.
    pub fn apply(&mut self, family: Family, snapshot: &Snapshot) -> bool {
        if snapshot.is_error() {
            let message = snapshot.error_message().unwrap_or("sample failed");
            log::debug!("Skipping {} update: {}", family, message);
            self.errors.insert(family, message.to_string());
            return false;
        }

        let rendered = match family {
            Family::Cpu => render_cpu(&self.cpu, snapshot).map(|p| self.cpu = p),
            Family::Ram => render_ram(&self.ram, snapshot).map(|p| self.ram = p),
            Family::Disk => render_disk(&self.disk, snapshot).map(|p| self.disk = p),
            Family::Battery => render_battery(&self.battery, snapshot).map(|p| self.battery = p),
            Family::Network => render_network(&self.network, snapshot).map(|p| self.network = p),
        };

        match rendered {
            Ok(()) => {
                self.errors.remove(&family);
                true
            }
            Err(e) => {
                log::debug!("Failed to render {} snapshot: {}", family, e);
                false
            }
        }
    }
}
