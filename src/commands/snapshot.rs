//! One-shot sampling for scripting.

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde_json::{Map, Value};

use crate::core::telemetry::probes::{sample_or_error, system_probe};
use crate::core::telemetry::Family;

/// Sample the requested families once and print them as a JSON object
/// keyed by family name
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let families: Vec<Family> = match matches.get_many::<String>("family") {
        Some(values) => values
            .map(|v| v.parse::<Family>())
            .collect::<std::result::Result<_, _>>()
            .context("Invalid --family value")?,
        None => Family::ALL.to_vec(),
    };

    let mut output = Map::new();
    for family in families {
        let mut probe = system_probe(family);

        // Rate-based readings need two samples
        let warmup = probe.warmup();
        if !warmup.is_zero() {
            let _ = probe.sample();
            std::thread::sleep(warmup);
        }

        let snapshot = sample_or_error(probe.as_mut());
        output.insert(family.to_string(), serde_json::to_value(&snapshot)?);
    }

    let json = Value::Object(output);
    if matches.get_flag("pretty") {
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{}", serde_json::to_string(&json)?);
    }

    Ok(())
}
