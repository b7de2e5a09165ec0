use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::event_handler::DashboardEvent;
use super::main_window::MainWindow;
use super::render::render_ui;

/// Settings for the dashboard event loop
#[derive(Debug, Clone, Copy)]
pub struct DashboardConfig {
    /// Upper bound on the time between frames
    pub frame: Duration,
    /// Smallest terminal size the layout is drawn in
    pub min_size: (u16, u16),
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            frame: Duration::from_millis(50),
            min_size: (80, 24),
        }
    }
}

/// Run the dashboard until the window closes
pub fn run_dashboard(mut window: MainWindow, config: DashboardConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(e) => {
            restore_terminal_best_effort();
            return Err(e).context("Failed to create terminal");
        }
    };

    window.show();
    let result = event_loop(&mut terminal, &mut window, config);

    // Stop sampling before handing the terminal back
    window.close();

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    window: &mut MainWindow,
    config: DashboardConfig,
) -> Result<()> {
    let mut dirty = true;

    loop {
        dirty |= window.process_pending();
        dirty |= window.tick(Instant::now());

        if dirty {
            terminal.draw(|frame| render_ui(frame, window, config.min_size))?;
            dirty = false;
        }

        if event::poll(config.frame).context("Event poll failed")? {
            let dashboard_event = match event::read().context("Event read failed")? {
                Event::Key(key) => DashboardEvent::from_key(key, window.dialog().is_some()),
                Event::Resize(_, _) => DashboardEvent::Resize,
                _ => DashboardEvent::None,
            };

            if dashboard_event != DashboardEvent::None {
                window.handle_event(dashboard_event);
                dirty = true;
            }
        }

        // Check if should quit
        if window.should_quit() {
            return Ok(());
        }
    }
}

fn restore_terminal_best_effort() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}
