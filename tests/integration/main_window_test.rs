use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use techsuite::core::config::Config;
use techsuite::core::telemetry::{Family, MonitoringClient, Snapshot, SnapshotHandler};
use techsuite::error::{Result, TechSuiteError};
use techsuite::platform::AdminState;
use techsuite::ui::dashboard::{
    DashboardEvent, MainWindow, MessageKind, ThemeManager, WindowState, TAB_TITLES,
};
use tempfile::TempDir;

#[derive(Default)]
struct ClientLog {
    stop_calls: AtomicUsize,
    handlers: Mutex<Vec<(Family, SnapshotHandler)>>,
}

struct FakeClient {
    calls: Arc<ClientLog>,
    running: bool,
    fail_start: bool,
    fail_stop: bool,
}

impl MonitoringClient for FakeClient {
    fn register_callback(&mut self, family: Family, handler: SnapshotHandler) -> Result<()> {
        self.calls.handlers.lock().push((family, handler));
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        if self.fail_start {
            return Err(TechSuiteError::system_monitor("runtime unavailable"));
        }
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.calls.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.running = false;
        if self.fail_stop {
            return Err(TechSuiteError::system_monitor("samplers did not stop in time"));
        }
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

struct Fixture {
    window: MainWindow,
    calls: Arc<ClientLog>,
    _dir: TempDir,
}

fn fixture_with(fail_start: bool, fail_stop: bool) -> Fixture {
    let dir = TempDir::new().unwrap();
    let calls = Arc::new(ClientLog::default());
    let client = FakeClient {
        calls: calls.clone(),
        running: false,
        fail_start,
        fail_stop,
    };

    let window = MainWindow::new(
        &Config::default(),
        Box::new(client),
        ThemeManager::new(dir.path()),
        AdminState::limited(),
    )
    .unwrap();

    Fixture {
        window,
        calls,
        _dir: dir,
    }
}

fn fixture() -> Fixture {
    fixture_with(false, false)
}

fn deliver(calls: &ClientLog, family: Family, snapshot: Snapshot) {
    let snapshot = Arc::new(snapshot);
    for (f, handler) in calls.handlers.lock().iter() {
        if *f == family {
            handler(snapshot.clone());
        }
    }
}

#[test]
fn test_new_window_is_ready() {
    let f = fixture();
    assert_eq!(f.window.state(), WindowState::Ready);
    assert_eq!(f.window.status(), "Ready");
    assert!(f.window.title().contains("Limited mode"));
    assert_eq!(f.calls.handlers.lock().len(), Family::ALL.len());
}

#[test]
fn test_close_stops_monitoring_once() {
    let mut f = fixture();
    f.window.show();

    f.window.close();
    f.window.close();
    assert_eq!(f.window.state(), WindowState::Closed);
    assert!(f.window.should_quit());

    drop(f.window);
    assert_eq!(f.calls.stop_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_close_succeeds_when_stop_fails() {
    let mut f = fixture_with(false, true);
    f.window.show();
    f.window.handle_event(DashboardEvent::Quit);

    assert_eq!(f.window.state(), WindowState::Closed);
    assert_eq!(f.calls.stop_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_status_updates_from_any_thread() {
    let mut f = fixture();
    let handle = f.window.status_handle();

    std::thread::spawn(move || handle.set("Scanning disks"))
        .join()
        .unwrap();

    assert!(f.window.process_pending());
    assert_eq!(f.window.status(), "Scanning disks");
}

#[test]
fn test_show_starts_monitoring() {
    let mut f = fixture();
    f.window.show();
    f.window.process_pending();

    assert!(f.window.monitoring().is_monitoring());
    assert_eq!(f.window.status(), "Monitoring active");

    f.window.handle_event(DashboardEvent::ToggleMonitoring);
    f.window.process_pending();
    assert_eq!(f.window.status(), "Monitoring stopped");
}

#[test]
fn test_start_failure_opens_error_dialog() {
    let mut f = fixture_with(true, false);
    f.window.show();

    let dialog = f.window.dialog().unwrap();
    assert_eq!(dialog.kind, MessageKind::Error);
    assert!(dialog.message.contains("runtime unavailable"));

    f.window.handle_event(DashboardEvent::Dismiss);
    assert!(f.window.dialog().is_none());
}

#[test]
fn test_snapshot_reaches_panel() {
    let mut f = fixture();
    f.window.show();

    deliver(
        &f.calls,
        Family::Cpu,
        Snapshot::new()
            .with("percent", 47.5)
            .with("physical_cores", 4)
            .with("logical_cores", 8)
            .with("frequency", serde_json::json!({"current": 3200})),
    );
    assert!(f.window.process_pending());

    let cpu = &f.window.monitoring().cpu;
    assert_eq!(cpu.usage_text(), "Usage: 47.5%");
    assert_eq!(cpu.cores_text(), "Cores: 4 physical, 8 logical");
    assert_eq!(cpu.frequency_text(), "Frequency: 3200 MHz");
    assert_eq!(cpu.progress(), 47);
}

#[test]
fn test_error_snapshot_keeps_panel() {
    let mut f = fixture();
    deliver(&f.calls, Family::Battery, Snapshot::error("No battery detected"));
    f.window.process_pending();

    assert_eq!(f.window.monitoring().battery.status_text(), "Status: ---");
    assert_eq!(
        f.window.monitoring().error_for(Family::Battery),
        Some("No battery detected")
    );
}

#[test]
fn test_tab_navigation_wraps() {
    let mut f = fixture();
    assert_eq!(f.window.selected_tab(), 0);

    f.window.handle_event(DashboardEvent::PrevTab);
    assert_eq!(f.window.selected_tab(), TAB_TITLES.len() - 1);

    f.window.handle_event(DashboardEvent::NextTab);
    assert_eq!(f.window.selected_tab(), 0);

    f.window.handle_event(DashboardEvent::SelectTab(4));
    assert_eq!(TAB_TITLES[f.window.selected_tab()], "Registry Hacks");

    f.window.handle_event(DashboardEvent::SelectTab(42));
    assert_eq!(f.window.selected_tab(), 4);
}

#[test]
fn test_reload_without_theme_warns() {
    let mut f = fixture();
    f.window.handle_event(DashboardEvent::ReloadTheme);
    assert_eq!(f.window.dialog().unwrap().kind, MessageKind::Warning);
}

#[test]
fn test_performance_profile_dialog() {
    let mut f = fixture();
    f.window.handle_event(DashboardEvent::RunProfile);
    let dialog = f.window.dialog().unwrap();
    assert_eq!(dialog.title, "Performance Profile");
    assert_eq!(dialog.kind, MessageKind::Warning);
    f.window.handle_event(DashboardEvent::Dismiss);

    f.window.show();
    deliver(&f.calls, Family::Cpu, Snapshot::new().with("percent", 96.0));
    f.window.process_pending();
    f.window.handle_event(DashboardEvent::RunProfile);

    let dialog = f.window.dialog().unwrap();
    assert_eq!(dialog.kind, MessageKind::Info);
    assert!(dialog.message.contains("CPU Usage: 96.0%"));
    assert!(dialog.message.contains("CPU is saturated"));
}

#[test]
fn test_console_clear_and_typewriter() {
    let mut f = fixture();
    f.window.show();
    assert!(f.window.console().is_animating());

    f.window.tick(Instant::now() + Duration::from_secs(60));
    assert!(f.window.console().text().contains("Press ? for help."));
    assert_eq!(f.window.console().line_count(), 1);

    f.window.handle_event(DashboardEvent::ToggleMonitoring);
    f.window.handle_event(DashboardEvent::FinishAnimation);
    let lines: Vec<&str> = f.window.console().text().lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("Press ? for help."));
    assert_eq!(lines[1], "> monitoring paused");

    f.window.handle_event(DashboardEvent::ClearConsole);
    assert_eq!(f.window.console().text(), "");
}
