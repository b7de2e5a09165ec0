use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::process::ExitCode;

use techsuite::commands;
use techsuite::ui;

fn build_cli() -> Command {
    Command::new("techsuite")
        .version(env!("CARGO_PKG_VERSION"))
        .about("System maintenance dashboard with live resource monitoring")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Configuration file to use instead of the default location"),
        )
        .arg(
            Arg::new("resources")
                .long("resources")
                .value_name("DIR")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory holding theme resources"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("NAME")
                .help("Theme to apply at startup"),
        )
        .arg(
            Arg::new("skip-admin-check")
                .long("skip-admin-check")
                .action(ArgAction::SetTrue)
                .help("Do not prompt for administrator privileges"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .value_parser(["error", "warn", "info", "debug", "trace"])
                .help("Log verbosity (RUST_LOG overrides it)"),
        )
        .subcommand(
            Command::new("themes").about("List available themes, marking the configured one"),
        )
        .subcommand(
            Command::new("snapshot")
                .about("Sample system resources once and print them as JSON")
                .arg(
                    Arg::new("family")
                        .short('f')
                        .long("family")
                        .value_name("FAMILY")
                        .action(ArgAction::Append)
                        .value_parser(["cpu", "ram", "memory", "disk", "battery", "network"])
                        .help("Metric family to sample (repeatable, default: all)"),
                )
                .arg(
                    Arg::new("pretty")
                        .short('p')
                        .long("pretty")
                        .action(ArgAction::SetTrue)
                        .help("Pretty-print the JSON output"),
                ),
        )
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    let result = match matches.subcommand() {
        Some(("themes", sub_matches)) => commands::themes(sub_matches),
        Some(("snapshot", sub_matches)) => commands::snapshot(sub_matches),
        _ => commands::run(&matches),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Fatal error: {:#}", e);
            ui::error(&format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}
