// Console output and interactive prompts used before the dashboard starts

use anyhow::Result;
use colored::Colorize;
use dialoguer::Select;

use crate::core::config::Config;
use crate::platform::AdminState;

/// Display a warning message
pub fn warn(message: &str) {
    eprintln!("{}", format!("⚠️  Warning: {}", message).yellow().bold());
}

/// Display an info message
pub fn info(message: &str) {
    println!("{}", message.cyan());
}

/// Display an error message
pub fn error(message: &str) {
    eprintln!("{}", message.red().bold());
}

/// Display a dimmed/secondary message
pub fn dimmed(message: &str) {
    println!("{}", message.dimmed());
}

/// Banner printed before the dashboard takes over the terminal
pub fn welcome_banner(config: &Config) -> String {
    const WIDTH: usize = 59;
    let rule = "═".repeat(WIDTH);
    let blank = format!("║{}║", " ".repeat(WIDTH));
    let centered = |text: &str| format!("║{:^width$}║", text, width = WIDTH);

    [
        format!("╔{}╗", rule),
        blank.clone(),
        centered(&config.app.name),
        centered(&format!("Version {}", config.app.version)),
        blank.clone(),
        centered("System Maintenance Dashboard"),
        blank,
        format!("╚{}╝", rule),
    ]
    .join("\n")
}

pub fn show_welcome_message(config: &Config) {
    println!();
    println!("{}", welcome_banner(config).green().bold());
    println!();
    dimmed("Starting application...");
    log::info!("{} v{} starting", config.app.name, config.app.version);
}

/// Answer to the administrator prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminChoice {
    ContinueLimited,
    RequestElevation,
    Exit,
}

/// What startup should do after the privilege check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupDecision {
    Continue(AdminState),
    /// Stop this process: the user quit, or an elevated copy was launched
    Exit,
}

const ADMIN_CHOICES: [&str; 3] = [
    "Yes, run without admin (limited functionality)",
    "No, restart with administrator privileges",
    "Exit",
];

/// Ask whether to continue without administrator rights.
pub fn prompt_admin_choice(last_error: Option<&str>) -> Result<AdminChoice> {
    println!();
    println!(
        "{}",
        "Administrator privileges are required for advanced features:"
            .yellow()
            .bold()
    );
    println!("  • Some tweaks and maintenance operations require admin rights");
    println!("  • Registry modifications need elevated permissions");
    println!("  • System maintenance tools (SFC, DISM) require admin access");

    if let Some(message) = last_error {
        println!();
        error(&format!("Elevation failed: {}", message));
    }
    println!();

    let selection = Select::new()
        .with_prompt("Run without admin? (Limited functionality)")
        .items(&ADMIN_CHOICES[..])
        .default(1)
        .interact_opt()?;

    Ok(match selection {
        Some(0) => AdminChoice::ContinueLimited,
        Some(1) => AdminChoice::RequestElevation,
        _ => AdminChoice::Exit,
    })
}

/// Decide the privilege mode. A failed elevation asks again instead of
/// aborting startup.
pub fn resolve_admin_mode<C, E>(is_admin: bool, mut choose: C, mut elevate: E) -> Result<StartupDecision>
where
    C: FnMut(Option<&str>) -> Result<AdminChoice>,
    E: FnMut() -> crate::error::Result<()>,
{
    if is_admin {
        log::info!("Running with administrator privileges");
        return Ok(StartupDecision::Continue(AdminState::elevated()));
    }

    log::warn!("Not running as administrator");
    let mut last_error: Option<String> = None;

    loop {
        match choose(last_error.as_deref())? {
            AdminChoice::ContinueLimited => {
                log::info!("User chose to continue without admin privileges");
                return Ok(StartupDecision::Continue(AdminState::limited()));
            }
            AdminChoice::RequestElevation => {
                log::info!("User requested admin elevation");
                match elevate() {
                    Ok(()) => {
                        log::info!("Elevated instance launched, exiting");
                        info("Started an elevated instance in a new window.");
                        return Ok(StartupDecision::Exit);
                    }
                    Err(e) => {
                        log::error!("Failed to request admin elevation: {}", e);
                        last_error = Some(e.to_string());
                    }
                }
            }
            AdminChoice::Exit => {
                log::info!("Application startup cancelled by user");
                return Ok(StartupDecision::Exit);
            }
        }
    }
}
