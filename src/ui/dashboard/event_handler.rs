use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events that can occur in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    /// Close the window and quit
    Quit,
    /// Toggle help overlay
    ToggleHelp,
    NextTab,
    PrevTab,
    /// Jump to a tab by index
    SelectTab(usize),
    /// Start or stop sampling
    ToggleMonitoring,
    /// Summarize current load and bottlenecks
    RunProfile,
    CycleTheme,
    ReloadTheme,
    ClearConsole,
    /// Reveal the rest of the console animation
    FinishAnimation,
    /// Close the open dialog
    Dismiss,
    /// Terminal was resized
    Resize,
    /// No action
    None,
}

impl DashboardEvent {
    /// Map a key press. While a dialog is open every key dismisses it.
    pub fn from_key(key: KeyEvent, dialog_open: bool) -> Self {
        if key.kind != KeyEventKind::Press {
            return DashboardEvent::None;
        }

        if dialog_open {
            return DashboardEvent::Dismiss;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return DashboardEvent::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => DashboardEvent::Quit,
            KeyCode::Char('?') | KeyCode::Char('h') => DashboardEvent::ToggleHelp,
            KeyCode::Tab | KeyCode::Right => DashboardEvent::NextTab,
            KeyCode::BackTab | KeyCode::Left => DashboardEvent::PrevTab,
            KeyCode::Char(c @ '1'..='8') => DashboardEvent::SelectTab(c as usize - '1' as usize),
            KeyCode::Char('m') => DashboardEvent::ToggleMonitoring,
            KeyCode::Char('p') => DashboardEvent::RunProfile,
            KeyCode::Char('t') => DashboardEvent::CycleTheme,
            KeyCode::Char('r') => DashboardEvent::ReloadTheme,
            KeyCode::Char('c') => DashboardEvent::ClearConsole,
            KeyCode::Enter => DashboardEvent::FinishAnimation,
            _ => DashboardEvent::None,
        }
    }
}
