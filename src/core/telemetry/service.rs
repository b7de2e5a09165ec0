//! Background sampling service.
//!
//! Owns a small Tokio runtime with one sampler task per registered family.
//! Samplers invoke the registered handlers directly; handlers are expected to
//! hand the snapshot off (see [`super::dispatch`]) rather than render.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::probes::{sample_or_error, system_probe_factory, Probe, ProbeFactory};
use super::snapshot::{Family, Snapshot};
use crate::core::config::MonitoringSection;
use crate::error::{Result, TechSuiteError};

/// Callback receiving each snapshot of one family.
pub type SnapshotHandler = Arc<dyn Fn(Arc<Snapshot>) + Send + Sync>;

const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// The interface the UI consumes to receive telemetry.
pub trait MonitoringClient: Send {
    /// Add a handler for a family. Only allowed while stopped.
    fn register_callback(&mut self, family: Family, handler: SnapshotHandler) -> Result<()>;

    /// Begin sampling. No-op when already running.
    fn start(&mut self) -> Result<()>;

    /// Halt sampling. No-op when already stopped.
    fn stop(&mut self) -> Result<()>;

    fn is_running(&self) -> bool;
}

/// Live samplers tracking; decremented when a sampler future is dropped.
struct SamplerGuard(Arc<AtomicUsize>);

impl SamplerGuard {
    fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for SamplerGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct MonitoringService {
    runtime: tokio::runtime::Runtime,
    intervals: MonitoringSection,
    factory: ProbeFactory,
    handlers: BTreeMap<Family, Vec<SnapshotHandler>>,
    shutdown_tx: Option<broadcast::Sender<()>>,
    tasks: Vec<JoinHandle<()>>,
    active: Arc<AtomicUsize>,
}

impl MonitoringService {
    /// Create a service sampling the host system.
    pub fn new(intervals: MonitoringSection) -> Result<Self> {
        Self::with_probe_factory(intervals, system_probe_factory())
    }

    /// Create a service with custom probes.
    pub fn with_probe_factory(intervals: MonitoringSection, factory: ProbeFactory) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .thread_name("techsuite-sampler")
            .build()?;

        Ok(Self {
            runtime,
            intervals,
            factory,
            handlers: BTreeMap::new(),
            shutdown_tx: None,
            tasks: Vec::new(),
            active: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Number of sampler tasks currently alive.
    pub fn active_samplers(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    pub fn registered_families(&self) -> Vec<Family> {
        self.handlers
            .iter()
            .filter(|(_, handlers)| !handlers.is_empty())
            .map(|(family, _)| *family)
            .collect()
    }
}

impl MonitoringClient for MonitoringService {
    fn register_callback(&mut self, family: Family, handler: SnapshotHandler) -> Result<()> {
        if self.is_running() {
            return Err(TechSuiteError::AlreadyRunning);
        }
        self.handlers.entry(family).or_default().push(handler);
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }

        let (shutdown_tx, _) = broadcast::channel::<()>(1);

        for (family, handlers) in &self.handlers {
            if handlers.is_empty() {
                continue;
            }

            let probe = (self.factory)(*family);
            let period = self.intervals.interval_for(*family);
            let guard = SamplerGuard::new(self.active.clone());

            self.tasks.push(self.runtime.spawn(sampler_task(
                *family,
                probe,
                period,
                handlers.clone(),
                shutdown_tx.subscribe(),
                guard,
            )));
        }

        log::info!("Monitoring started ({} samplers)", self.tasks.len());
        self.shutdown_tx = Some(shutdown_tx);
        Ok(())
    }

    /// Blocks until every sampler has exited; must not be called from inside
    /// the service's own runtime.
    fn stop(&mut self) -> Result<()> {
        let Some(shutdown_tx) = self.shutdown_tx.take() else {
            return Ok(());
        };

        // send() only fails when every sampler already exited
        let _ = shutdown_tx.send(());

        let tasks = std::mem::take(&mut self.tasks);
        let aborts: Vec<_> = tasks.iter().map(|t| t.abort_handle()).collect();

        let joined = self.runtime.block_on(async {
            tokio::time::timeout(STOP_TIMEOUT, async {
                for task in tasks {
                    if let Err(e) = task.await {
                        if e.is_panic() {
                            log::error!("Sampler task panicked: {}", e);
                        }
                    }
                }
            })
            .await
        });

        if joined.is_err() {
            for abort in aborts {
                abort.abort();
            }
            return Err(TechSuiteError::system_monitor(
                "samplers did not stop in time",
            ));
        }

        log::info!("Monitoring stopped");
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }
}

impl Drop for MonitoringService {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::warn!("Error stopping monitoring on drop: {}", e);
        }
    }
}

async fn sampler_task(
    family: Family,
    mut probe: Box<dyn Probe>,
    period: Duration,
    handlers: Vec<SnapshotHandler>,
    mut shutdown: broadcast::Receiver<()>,
    _guard: SamplerGuard,
) {
    log::debug!("{} sampler started (every {:?})", family, period);

    let warmup = probe.warmup();
    if !warmup.is_zero() {
        // Prime the probe so the first delivered reading is meaningful
        let _ = probe.sample();
        tokio::select! {
            _ = tokio::time::sleep(warmup) => {}
            _ = shutdown.recv() => return,
        }
    }

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = Arc::new(sample_or_error(probe.as_mut()));
                for handler in &handlers {
                    handler(snapshot.clone());
                }
                log::trace!("{} snapshot delivered", family);
            }
            _ = shutdown.recv() => {
                log::debug!("{} sampler shutting down", family);
                break;
            }
        }
    }
}
