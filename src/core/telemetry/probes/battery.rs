use battery::units::ratio::percent;
use battery::units::time::second;
use battery::State;

use super::Probe;
use crate::core::telemetry::{Family, Snapshot};
use crate::error::{Result, TechSuiteError};

/// Charge level and power source of the first battery.
///
/// The battery manager is created per sample; it is not `Send`, and battery
/// state changes slowly enough that the cost does not matter.
#[derive(Debug, Default)]
pub struct BatteryProbe;

impl BatteryProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Probe for BatteryProbe {
    fn family(&self) -> Family {
        Family::Battery
    }

    fn sample(&mut self) -> Result<Snapshot> {
        let manager = battery::Manager::new()
            .map_err(|e| TechSuiteError::metric_collection(format!("battery manager: {}", e)))?;

        let battery = manager
            .batteries()
            .map_err(|e| TechSuiteError::metric_collection(format!("battery list: {}", e)))?
            .next()
            .ok_or_else(|| TechSuiteError::metric_collection("No battery detected"))?
            .map_err(|e| TechSuiteError::metric_collection(format!("battery read: {}", e)))?;

        let power_plugged = is_plugged(battery.state());
        let secs_left = battery
            .time_to_empty()
            .map(|t| t.get::<second>().max(0.0) as u64);

        Ok(Snapshot::new()
            .with("percent", battery.state_of_charge().get::<percent>() as f64)
            .with("power_plugged", power_plugged)
            .with("secsleft", secs_left))
    }
}

/// Only a draining battery counts as unplugged. `Unknown` is what many
/// firmwares report while a charge limit holds the level on mains power.
fn is_plugged(state: State) -> bool {
    !matches!(state, State::Discharging | State::Empty)
}
