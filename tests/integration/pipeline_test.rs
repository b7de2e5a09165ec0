//! Sampler threads through the dispatch queue into the panels, with a real
//! monitoring service and scripted probes.

use std::sync::Arc;
use std::time::{Duration, Instant};

use techsuite::core::config::{Config, MonitoringSection};
use techsuite::core::telemetry::{Family, MonitoringService, Probe, ProbeFactory, Snapshot};
use techsuite::error::{Result, TechSuiteError};
use techsuite::platform::AdminState;
use techsuite::ui::dashboard::{MainWindow, ThemeManager};
use tempfile::TempDir;

struct ScriptedProbe {
    family: Family,
}

impl Probe for ScriptedProbe {
    fn family(&self) -> Family {
        self.family
    }

    fn sample(&mut self) -> Result<Snapshot> {
        let gb = 1024u64 * 1024 * 1024;
        match self.family {
            Family::Cpu => Ok(Snapshot::new()
                .with("percent", 12.5)
                .with("physical_cores", 2)
                .with("logical_cores", 4)),
            Family::Ram => Ok(Snapshot::new()
                .with("percent", 50.0)
                .with("used", 4 * gb)
                .with("total", 8 * gb)
                .with("available", 4 * gb)),
            Family::Disk => Ok(Snapshot::new().with("partitions", Vec::<serde_json::Value>::new())),
            Family::Battery => Err(TechSuiteError::metric_collection("No battery detected")),
            // Wrong type: the renderer rejects it
            Family::Network => Ok(Snapshot::new().with("interfaces", "eth0")),
        }
    }
}

#[test]
fn test_live_pipeline_updates_panels() {
    let dir = TempDir::new().unwrap();
    let intervals = MonitoringSection {
        cpu_ms: 100,
        ram_ms: 100,
        disk_ms: 100,
        battery_ms: 100,
        network_ms: 100,
    };
    let factory: ProbeFactory =
        Arc::new(|family| Box::new(ScriptedProbe { family }) as Box<dyn Probe>);
    let service = MonitoringService::with_probe_factory(intervals, factory).unwrap();

    let mut window = MainWindow::new(
        &Config::default(),
        Box::new(service),
        ThemeManager::new(dir.path()),
        AdminState::elevated(),
    )
    .unwrap();
    window.show();

    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        window.process_pending();
        let tab = window.monitoring();
        if tab.cpu.percent.is_some()
            && tab.ram.percent.is_some()
            && tab.error_for(Family::Battery).is_some()
        {
            break;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    let tab = window.monitoring();
    assert_eq!(tab.cpu.usage_text(), "Usage: 12.5%");
    assert_eq!(tab.ram.details_text(), "4.00 GB / 8.00 GB");
    assert_eq!(tab.disk.text, "");
    assert!(tab.error_for(Family::Battery).unwrap().contains("No battery"));
    assert_eq!(tab.network.text, "Loading network information...");
    assert_eq!(window.status(), "Monitoring active");

    window.close();
    window.process_pending();
    assert_eq!(window.status(), "Monitoring stopped");
    assert!(!window.monitoring().is_monitoring());
}
