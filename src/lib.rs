// Tech Suite Library - Public API

// Re-export error types
pub mod error;
pub use error::{Result, TechSuiteError};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Initialize logging.
///
/// `RUST_LOG` wins over `level`. With a `file`, records are appended there so
/// they never draw over the dashboard; without one they go to stderr.
pub fn init_logging(level: &str, file: Option<&Path>) {
    let filter = level.parse().unwrap_or(log::LevelFilter::Info);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(filter).parse_default_env();

    if let Some(path) = file {
        let opened = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|_| OpenOptions::new().create(true).append(true).open(path));

        match opened {
            Ok(handle) => {
                builder
                    .format(|buf, record| {
                        writeln!(
                            buf,
                            "{} [{}] {}: {}",
                            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                            record.level(),
                            record.target(),
                            record.args()
                        )
                    })
                    .target(env_logger::Target::Pipe(Box::new(handle)));
            }
            Err(e) => eprintln!("Could not open log file {:?}: {}", path, e),
        }
    }

    // A second init (tests, repeated runs) keeps the first logger
    let _ = builder.try_init();
}
