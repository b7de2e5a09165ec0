// Command handlers module
pub mod run;
pub mod snapshot;
pub mod themes;

use anyhow::Result;
use clap::ArgMatches;
use std::path::PathBuf;

use crate::core::Config;
use crate::ui;

// Re-exports for cleaner imports
pub use run::execute as run;
pub use snapshot::execute as snapshot;
pub use themes::execute as themes;

/// Load the configuration named by `--config`, or the default one.
///
/// Startup never fails on configuration: a problem is printed, returned as a
/// warning for the log, and the defaults are used.
pub(crate) fn load_config(matches: &ArgMatches) -> (Config, Option<String>) {
    let loaded: Result<Config> = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    match loaded {
        Ok(config) => (config, None),
        Err(e) => {
            let warning = format!("Could not load configuration, using defaults: {:#}", e);
            ui::warn(&warning);
            (Config::default(), Some(warning))
        }
    }
}
