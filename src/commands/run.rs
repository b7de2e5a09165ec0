//! Dashboard startup: configuration, logging, banner, theme, privileges,
//! then the main window event loop.

use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use super::load_config;
use crate::core::telemetry::MonitoringService;
use crate::platform::{self, AdminState};
use crate::ui::{self, DashboardConfig, MainWindow, StartupDecision, ThemeManager};

const MIN_FRAME_MS: u64 = 10;

/// Execute the dashboard
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let (mut config, config_warning) = load_config(matches);

    if let Some(theme) = matches.get_one::<String>("theme") {
        config.ui.theme = theme.clone();
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }

    let log_file = config.log_file_path();
    crate::init_logging(&config.logging.level, log_file.as_deref());
    log::info!("Logging initialized");
    if let Some(warning) = config_warning {
        log::warn!("{}", warning);
    }

    ui::show_welcome_message(&config);
    check_requirements()?;

    let resource_root = ui::resolve_resource_root(matches.get_one::<PathBuf>("resources").cloned());
    let mut themes = ThemeManager::new(&resource_root);
    if themes.apply(&config.ui.theme).is_err() {
        log::warn!("Failed to apply theme: {}, using default", config.ui.theme);
        ui::warn(&format!(
            "Failed to apply theme '{}', using the built-in palette",
            config.ui.theme
        ));
    }

    let admin = if matches.get_flag("skip-admin-check") {
        AdminState {
            is_admin: platform::is_admin(),
            declined: false,
        }
    } else {
        match ui::resolve_admin_mode(
            platform::is_admin(),
            ui::prompt_admin_choice,
            platform::request_elevation,
        )? {
            StartupDecision::Continue(state) => state,
            StartupDecision::Exit => return Ok(()),
        }
    };

    log::info!("Creating main window...");
    let service = MonitoringService::new(config.monitoring.clone())
        .context("Failed to create monitoring service")?;
    let window = MainWindow::new(&config, Box::new(service), themes, admin)
        .context("Failed to create main window")?;

    let dashboard = DashboardConfig {
        frame: Duration::from_millis(config.ui.frame_ms.max(MIN_FRAME_MS)),
        min_size: (config.ui.window.min_width, config.ui.window.min_height),
    };

    log::info!("Application started successfully");
    ui::run_dashboard(window, dashboard).context("Dashboard terminated with an error")?;
    log::info!("Application closed normally");

    Ok(())
}

/// The dashboard needs an interactive terminal on both ends.
fn check_requirements() -> Result<()> {
    log::info!("Checking requirements...");

    if !std::io::stdout().is_terminal() {
        log::error!("Requirements check failed: stdout is not a terminal");
        bail!("techsuite must be run in an interactive terminal (try `techsuite snapshot` for scripting)");
    }

    if !std::io::stdin().is_terminal() {
        log::error!("Requirements check failed: stdin is not a terminal");
        bail!("techsuite needs keyboard input from an interactive terminal");
    }

    log::info!("Requirements check passed");
    Ok(())
}
