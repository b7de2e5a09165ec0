// Tabbed terminal dashboard

pub mod app;
pub mod event_handler;
pub mod main_window;
pub mod monitoring_tab;
pub mod panels;
pub mod render;
pub mod terminal_output;
pub mod theme;
pub mod widgets;

pub use app::{run_dashboard, DashboardConfig};
pub use event_handler::DashboardEvent;
pub use main_window::{Dialog, MainWindow, MessageKind, WindowState, TAB_TITLES};
pub use monitoring_tab::MonitoringTab;
pub use terminal_output::TerminalOutput;
pub use theme::{resolve_resource_root, SharedStylesheet, Stylesheet, ThemeManager, THEMES};
