// UI module: pre-launch console prompts and the terminal dashboard

pub mod dashboard;
pub mod prompts;

// Re-export commonly used items for cleaner imports
pub use dashboard::{
    resolve_resource_root, run_dashboard, DashboardConfig, MainWindow, ThemeManager,
};
pub use prompts::{
    error, prompt_admin_choice, resolve_admin_mode, show_welcome_message, warn, AdminChoice,
    StartupDecision,
};
