use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use techsuite::core::config::MonitoringSection;
use techsuite::core::telemetry::{
    Family, MonitoringClient, MonitoringService, Probe, ProbeFactory, Snapshot, SnapshotHandler,
};
use techsuite::error::{Result, TechSuiteError};

struct CountingProbe {
    family: Family,
    count: u64,
}

impl Probe for CountingProbe {
    fn family(&self) -> Family {
        self.family
    }

    fn sample(&mut self) -> Result<Snapshot> {
        self.count += 1;
        Ok(Snapshot::new().with("percent", self.count as f64))
    }
}

struct FailingProbe;

impl Probe for FailingProbe {
    fn family(&self) -> Family {
        Family::Battery
    }

    fn sample(&mut self) -> Result<Snapshot> {
        Err(TechSuiteError::metric_collection("No battery detected"))
    }
}

fn fast_intervals() -> MonitoringSection {
    MonitoringSection {
        cpu_ms: 100,
        ram_ms: 100,
        disk_ms: 100,
        battery_ms: 100,
        network_ms: 100,
    }
}

fn counting_factory() -> ProbeFactory {
    Arc::new(|family| Box::new(CountingProbe { family, count: 0 }) as Box<dyn Probe>)
}

fn service() -> MonitoringService {
    MonitoringService::with_probe_factory(fast_intervals(), counting_factory()).unwrap()
}

type Received = Arc<Mutex<Vec<(Family, Arc<Snapshot>)>>>;

fn recording_handler(family: Family, received: &Received) -> SnapshotHandler {
    let received = received.clone();
    Arc::new(move |snapshot: Arc<Snapshot>| received.lock().push((family, snapshot)))
}

fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    condition()
}

#[test]
fn test_snapshots_arrive_per_family() {
    let received: Received = Arc::default();
    let mut service = service();
    service
        .register_callback(Family::Cpu, recording_handler(Family::Cpu, &received))
        .unwrap();
    service
        .register_callback(Family::Ram, recording_handler(Family::Ram, &received))
        .unwrap();

    service.start().unwrap();
    let both_seen = wait_until(Duration::from_secs(3), || {
        let got = received.lock();
        got.iter().any(|(f, _)| *f == Family::Cpu) && got.iter().any(|(f, _)| *f == Family::Ram)
    });
    service.stop().unwrap();

    assert!(both_seen);
    assert!(received
        .lock()
        .iter()
        .all(|(_, s)| s.get("percent").is_some() && s.contains_key("timestamp")));
}

#[test]
fn test_stop_then_start_leaves_one_sampler_per_family() {
    let received: Received = Arc::default();
    let mut service = service();
    for family in [Family::Cpu, Family::Disk, Family::Network] {
        service
            .register_callback(family, recording_handler(family, &received))
            .unwrap();
    }

    service.start().unwrap();
    assert_eq!(service.active_samplers(), 3);

    service.stop().unwrap();
    assert_eq!(service.active_samplers(), 0);
    assert!(!service.is_running());

    service.start().unwrap();
    service.start().unwrap();
    assert_eq!(service.active_samplers(), 3);

    service.stop().unwrap();
    service.stop().unwrap();
    assert_eq!(service.active_samplers(), 0);
}

#[test]
fn test_register_while_running_fails() {
    let received: Received = Arc::default();
    let mut service = service();
    service
        .register_callback(Family::Cpu, recording_handler(Family::Cpu, &received))
        .unwrap();
    service.start().unwrap();

    let err = service
        .register_callback(Family::Ram, recording_handler(Family::Ram, &received))
        .unwrap_err();
    assert!(matches!(err, TechSuiteError::AlreadyRunning));
    assert!(service.is_running());
    assert_eq!(service.registered_families(), vec![Family::Cpu]);

    service.stop().unwrap();
}

#[test]
fn test_each_handler_sees_every_snapshot() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let mut service = service();

    for counter in [&first, &second] {
        let counter = counter.clone();
        let handler: SnapshotHandler = Arc::new(move |_snapshot: Arc<Snapshot>| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        service.register_callback(Family::Cpu, handler).unwrap();
    }

    service.start().unwrap();
    assert!(wait_until(Duration::from_secs(3), || {
        first.load(Ordering::SeqCst) >= 2
    }));
    service.stop().unwrap();

    assert_eq!(first.load(Ordering::SeqCst), second.load(Ordering::SeqCst));
}

#[test]
fn test_probe_failure_delivers_error_snapshot() {
    let received: Received = Arc::default();
    let factory: ProbeFactory = Arc::new(|_| Box::new(FailingProbe) as Box<dyn Probe>);
    let mut service = MonitoringService::with_probe_factory(fast_intervals(), factory).unwrap();
    service
        .register_callback(Family::Battery, recording_handler(Family::Battery, &received))
        .unwrap();

    service.start().unwrap();
    assert!(wait_until(Duration::from_secs(3), || !received.lock().is_empty()));
    service.stop().unwrap();

    let got = received.lock();
    let (_, snapshot) = &got[0];
    assert!(snapshot.is_error());
    assert!(snapshot.error_message().unwrap().contains("No battery detected"));
}

#[test]
fn test_start_without_handlers_spawns_nothing() {
    let mut service = service();
    service.start().unwrap();
    assert!(service.is_running());
    assert_eq!(service.active_samplers(), 0);
    service.stop().unwrap();
}
