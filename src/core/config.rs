use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::telemetry::Family;

/// Application configuration.
///
/// Constructed once at startup and passed to the components that need it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub app: AppSection,
    pub ui: UiSection,
    pub monitoring: MonitoringSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub name: String,
    pub version: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "Tech Suite".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSection {
    pub theme: String,
    pub window: WindowSection,
    /// Redraw period of the event loop in milliseconds
    pub frame_ms: u64,
    /// Delay between revealed characters of a typewriter write
    pub typewriter_ms: u64,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            theme: "hacker_dark".to_string(),
            window: WindowSection::default(),
            frame_ms: 50,
            typewriter_ms: 10,
        }
    }
}

/// Minimum terminal size (columns/rows) the dashboard renders into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub min_width: u16,
    pub min_height: u16,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            min_width: 80,
            min_height: 24,
        }
    }
}

/// Sampling intervals per metric family, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringSection {
    pub cpu_ms: u64,
    pub ram_ms: u64,
    pub disk_ms: u64,
    pub battery_ms: u64,
    pub network_ms: u64,
}

impl Default for MonitoringSection {
    fn default() -> Self {
        Self {
            cpu_ms: 1000,
            ram_ms: 1000,
            disk_ms: 3000,
            battery_ms: 10_000,
            network_ms: 1000,
        }
    }
}

impl MonitoringSection {
    pub fn interval_for(&self, family: Family) -> Duration {
        let ms = match family {
            Family::Cpu => self.cpu_ms,
            Family::Ram => self.ram_ms,
            Family::Disk => self.disk_ms,
            Family::Battery => self.battery_ms,
            Family::Network => self.network_ms,
        };
        // A zero interval would spin the sampler
        Duration::from_millis(ms.max(100))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    /// Log file path; defaults to the local data directory
    pub file: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from an explicit path.
    ///
    /// A missing or empty file yields the default configuration. A file that
    /// does not parse is an error; callers decide whether to fall back.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Config::default());
        }

        serde_json::from_slice(&data)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data =
            serde_json::to_vec_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path, data)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("techsuite").join("config.json"))
    }

    /// Look up a value by dotted key, e.g. `ui.window.min_width`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let tree = serde_json::to_value(self).ok()?;
        let pointer = format!("/{}", key.replace('.', "/"));
        tree.pointer(&pointer).cloned()
    }

    /// Title shown in the window frame, e.g. `Tech Suite v0.1.0`.
    pub fn window_title(&self) -> String {
        format!("{} v{}", self.app.name, self.app.version)
    }

    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.logging.file.clone().or_else(|| {
            dirs::data_local_dir().map(|dir| dir.join("techsuite").join("techsuite.log"))
        })
    }
}
