use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::TechSuiteError;

/// Monitored resource category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Cpu,
    Ram,
    Disk,
    Battery,
    Network,
}

impl Family {
    pub const ALL: [Family; 5] = [
        Family::Cpu,
        Family::Ram,
        Family::Disk,
        Family::Battery,
        Family::Network,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Cpu => "cpu",
            Family::Ram => "ram",
            Family::Disk => "disk",
            Family::Battery => "battery",
            Family::Network => "network",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = TechSuiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(Family::Cpu),
            "ram" | "memory" => Ok(Family::Ram),
            "disk" | "disks" => Ok(Family::Disk),
            "battery" => Ok(Family::Battery),
            "network" | "net" => Ok(Family::Network),
            other => Err(TechSuiteError::system_monitor(format!(
                "unknown metric family '{}'",
                other
            ))),
        }
    }
}

/// One sampled reading for a metric family.
///
/// Values are JSON-like so that probes and renderers agree on a loose schema
/// rather than a struct per platform. A snapshot carrying an `error` key
/// marks a failed sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Map<String, Value>);

impl Snapshot {
    pub const ERROR_KEY: &'static str = "error";

    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        let mut map = Map::new();
        map.insert(Self::ERROR_KEY.to_string(), Value::String(message.into()));
        Self(map)
    }

    /// Builder-style insert used by the probes.
    pub fn with<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn insert<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_error(&self) -> bool {
        self.0.contains_key(Self::ERROR_KEY)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.0.get(Self::ERROR_KEY).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Snapshot {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Snapshot {
    type Error = TechSuiteError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(TechSuiteError::metric_collection(format!(
                "snapshot must be an object, got {}",
                other
            ))),
        }
    }
}
