use anyhow::Result;
use clap::ArgMatches;
use colored::Colorize;
use std::path::PathBuf;

use super::load_config;
use crate::ui::{resolve_resource_root, ThemeManager};

/// List known themes, marking the configured one and any that fail to load
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let (config, _) = load_config(matches);
    let root = resolve_resource_root(matches.get_one::<PathBuf>("resources").cloned());
    let manager = ThemeManager::new(&root);

    println!("{}", format!("Themes in {}", root.display()).white().bold());
    println!();

    for name in manager.available_themes() {
        let marker = if name == config.ui.theme { "*" } else { " " };
        match manager.load_theme(name) {
            Ok(_) => println!("  {} {}", marker.green().bold(), name.green()),
            Err(e) => println!(
                "  {} {} {}",
                marker.yellow().bold(),
                name.yellow(),
                format!("({})", e).dimmed()
            ),
        }
    }

    Ok(())
}
