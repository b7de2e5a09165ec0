use std::io;
use thiserror::Error;

/// Custom error type for the Tech Suite application
#[derive(Error, Debug)]
pub enum TechSuiteError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("No theme has been applied yet")]
    NoThemeApplied,

    #[error("Stylesheet error: {0}")]
    Stylesheet(String),

    #[error("Monitoring service is already running")]
    AlreadyRunning,

    #[error("System monitor error: {0}")]
    SystemMonitor(String),

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Elevation failed: {0}")]
    Elevation(String),
}

/// Result type alias for the Tech Suite application
pub type Result<T> = std::result::Result<T, TechSuiteError>;

impl TechSuiteError {
    pub fn stylesheet<S: Into<String>>(msg: S) -> Self {
        TechSuiteError::Stylesheet(msg.into())
    }

    pub fn system_monitor<S: Into<String>>(msg: S) -> Self {
        TechSuiteError::SystemMonitor(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        TechSuiteError::MetricCollection(msg.into())
    }

    pub fn render<S: Into<String>>(msg: S) -> Self {
        TechSuiteError::Render(msg.into())
    }

    /// Create an elevation error
    pub fn elevation<S: Into<String>>(msg: S) -> Self {
        TechSuiteError::Elevation(msg.into())
    }
}
