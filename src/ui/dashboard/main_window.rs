//! Top-level window model: tabs, status bar, console pane, dialogs and the
//! close lifecycle.

use std::time::{Duration, Instant};

use super::event_handler::DashboardEvent;
use super::monitoring_tab::MonitoringTab;
use super::terminal_output::TerminalOutput;
use super::theme::{SharedStylesheet, ThemeManager};
use crate::core::config::Config;
use crate::core::telemetry::{DispatchQueue, MonitoringClient, StatusHandle};
use crate::error::Result;
use crate::platform::AdminState;

pub const TAB_TITLES: [&str; 8] = [
    "Monitoring",
    "Diagnostics",
    "Maintenance",
    "Security",
    "Registry Hacks",
    "Debloat Windows",
    "System Tools",
    "Settings",
];

pub const MONITORING_TAB: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Constructing,
    Ready,
    Closing,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
    Question,
}

impl MessageKind {
    pub fn label(&self) -> &'static str {
        match self {
            MessageKind::Info => "Info",
            MessageKind::Warning => "Warning",
            MessageKind::Error => "Error",
            MessageKind::Question => "Question",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub message: String,
    pub kind: MessageKind,
}

pub struct MainWindow {
    state: WindowState,
    title: String,
    selected_tab: usize,
    status: String,
    status_handle: StatusHandle,
    queue: DispatchQueue,
    monitoring: MonitoringTab,
    console: TerminalOutput,
    themes: ThemeManager,
    dialog: Option<Dialog>,
    show_help: bool,
    admin: AdminState,
    /// The monitoring stop hook already ran
    stop_invoked: bool,
}

impl MainWindow {
    pub fn new(
        config: &Config,
        client: Box<dyn MonitoringClient>,
        themes: ThemeManager,
        admin: AdminState,
    ) -> Result<Self> {
        log::info!("Initializing main window");
        let (dispatcher, queue) = DispatchQueue::new();
        let monitoring = MonitoringTab::new(client, &dispatcher)?;

        let mut window = Self {
            state: WindowState::Constructing,
            title: format!("{} [{}]", config.window_title(), admin.label()),
            selected_tab: MONITORING_TAB,
            status: "Ready".to_string(),
            status_handle: dispatcher.status_handle(),
            queue,
            monitoring,
            console: TerminalOutput::new(Duration::from_millis(config.ui.typewriter_ms)),
            themes,
            dialog: None,
            show_help: false,
            admin,
            stop_invoked: false,
        };

        window.state = WindowState::Ready;
        log::info!("Main window initialized with {} tabs", TAB_TITLES.len());
        Ok(window)
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn admin(&self) -> AdminState {
        self.admin
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Thread-safe setter for the status bar.
    pub fn status_handle(&self) -> StatusHandle {
        self.status_handle.clone()
    }

    pub fn selected_tab(&self) -> usize {
        self.selected_tab
    }

    pub fn select_tab(&mut self, index: usize) {
        if index < TAB_TITLES.len() {
            self.selected_tab = index;
        }
    }

    pub fn next_tab(&mut self) {
        self.selected_tab = (self.selected_tab + 1) % TAB_TITLES.len();
    }

    pub fn prev_tab(&mut self) {
        self.selected_tab = if self.selected_tab == 0 {
            TAB_TITLES.len() - 1
        } else {
            self.selected_tab - 1
        };
    }

    pub fn monitoring(&self) -> &MonitoringTab {
        &self.monitoring
    }

    pub fn monitoring_mut(&mut self) -> &mut MonitoringTab {
        &mut self.monitoring
    }

    pub fn console(&self) -> &TerminalOutput {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut TerminalOutput {
        &mut self.console
    }

    pub fn themes(&self) -> &ThemeManager {
        &self.themes
    }

    pub fn stylesheet(&self) -> SharedStylesheet {
        self.themes.stylesheet()
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn help_visible(&self) -> bool {
        self.show_help
    }

    pub fn should_quit(&self) -> bool {
        self.state == WindowState::Closed
    }

    /// Open a modal message overlay. Any key dismisses it.
    pub fn show_message<T: Into<String>, M: Into<String>>(
        &mut self,
        title: T,
        message: M,
        kind: MessageKind,
    ) {
        let dialog = Dialog {
            title: title.into(),
            message: message.into(),
            kind,
        };
        log::debug!("Showing {} dialog: {}", kind.label(), dialog.title);
        self.dialog = Some(dialog);
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    /// Start monitoring and greet the user in the console.
    pub fn show(&mut self) {
        self.console.append_text(
            &format!("{} ready. Press ? for help.", self.title),
            true,
        );

        if let Err(e) = self.monitoring.start_monitoring() {
            log::error!("Failed to start monitoring: {}", e);
            self.show_message(
                "Monitoring",
                format!("Could not start monitoring: {}", e),
                MessageKind::Error,
            );
        }
    }

    /// Apply everything queued by background threads since the last frame.
    /// Returns true when something visible changed.
    pub fn process_pending(&mut self) -> bool {
        let (snapshots, status) = self.queue.drain_latest();
        let mut changed = false;

        for (family, snapshot) in snapshots {
            changed |= self.monitoring.apply(family, &snapshot);
        }

        if let Some(text) = status {
            self.status = text;
            changed = true;
        }

        changed
    }

    /// Advance the console animation.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.console.tick(now)
    }

    pub fn handle_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::Quit => self.close(),
            DashboardEvent::Dismiss => self.dismiss_dialog(),
            DashboardEvent::ToggleHelp => self.show_help = !self.show_help,
            DashboardEvent::NextTab => self.next_tab(),
            DashboardEvent::PrevTab => self.prev_tab(),
            DashboardEvent::SelectTab(index) => self.select_tab(index),
            DashboardEvent::ToggleMonitoring => match self.monitoring.toggle_monitoring() {
                Ok(true) => self.console.append_text("> monitoring resumed", true),
                Ok(false) => self.console.append_text("> monitoring paused", true),
                Err(e) => {
                    log::error!("Failed to toggle monitoring: {}", e);
                    self.show_message("Monitoring", e.to_string(), MessageKind::Error);
                }
            },
            DashboardEvent::RunProfile => self.run_performance_profile(),
            DashboardEvent::CycleTheme => match self.themes.cycle() {
                Ok(name) => self
                    .console
                    .append_text(&format!("> theme set to {}", name), true),
                Err(e) => self.show_message("Theme", e.to_string(), MessageKind::Warning),
            },
            DashboardEvent::ReloadTheme => match self.themes.reload() {
                Ok(()) => self.console.append_text("> theme reloaded", true),
                Err(e) => self.show_message("Theme", e.to_string(), MessageKind::Warning),
            },
            DashboardEvent::ClearConsole => self.console.clear(),
            DashboardEvent::FinishAnimation => self.console.finish(),
            DashboardEvent::Resize | DashboardEvent::None => {}
        }
    }

    fn run_performance_profile(&mut self) {
        log::info!("User initiated performance profiling");
        match self.monitoring.performance_profile() {
            Some(report) => {
                self.show_message("Performance Profile", report, MessageKind::Info)
            }
            None => self.show_message(
                "Performance Profile",
                "No samples yet. Start monitoring and try again.",
                MessageKind::Warning,
            ),
        }
    }

    /// Stop monitoring and close. The stop hook runs at most once and its
    /// failure never blocks closing.
    pub fn close(&mut self) {
        if matches!(self.state, WindowState::Closing | WindowState::Closed) {
            return;
        }

        log::info!("Closing main window");
        self.state = WindowState::Closing;

        if !self.stop_invoked {
            self.stop_invoked = true;
            if let Err(e) = self.monitoring.stop_monitoring() {
                log::error!("Error stopping monitoring: {}", e);
            }
        }

        self.state = WindowState::Closed;
        log::info!("Main window closed");
    }
}

impl Drop for MainWindow {
    fn drop(&mut self) {
        self.close();
    }
}
