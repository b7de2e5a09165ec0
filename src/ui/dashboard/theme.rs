//! Named themes loaded from stylesheet resources.
//!
//! A stylesheet is a JSON object mapping palette slots to colour names or
//! hex strings (`"accent": "#00ff41"`). The manager swaps the shared
//! stylesheet the renderer reads in a single write.

use parking_lot::RwLock;
use ratatui::style::{Color, Modifier, Style};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Result, TechSuiteError};

/// Known theme names and their resource files.
pub const THEMES: &[(&str, &str)] = &[
    ("hacker_dark", "hacker_dark.json"),
    ("hacker_light", "hacker_light.json"),
];

/// Stylesheet shared between the theme manager and the renderer.
pub type SharedStylesheet = Arc<RwLock<Stylesheet>>;

/// Colour palette used by every view.
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub border: Color,
    pub muted: Color,
    pub warning: Color,
    pub critical: Color,
    pub highlight: Color,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::hacker_dark()
    }
}

impl Stylesheet {
    /// Built-in palette used before any theme resource is applied.
    pub fn hacker_dark() -> Self {
        Self {
            background: Color::Black,
            foreground: Color::Green,
            accent: Color::LightGreen,
            border: Color::DarkGray,
            muted: Color::Gray,
            warning: Color::LightYellow,
            critical: Color::LightRed,
            highlight: Color::Cyan,
        }
    }

    /// Parse a stylesheet resource. Slots not present keep the built-in
    /// values; unknown slots are ignored with a warning.
    pub fn parse(content: &str) -> Result<Self> {
        let entries: BTreeMap<String, String> = serde_json::from_str(content)
            .map_err(|e| TechSuiteError::stylesheet(format!("invalid stylesheet: {}", e)))?;

        let mut sheet = Self::hacker_dark();
        for (slot, value) in &entries {
            let color = Color::from_str(value).map_err(|_| {
                TechSuiteError::stylesheet(format!("invalid colour '{}' for '{}'", value, slot))
            })?;

            match slot.as_str() {
                "background" => sheet.background = color,
                "foreground" => sheet.foreground = color,
                "accent" => sheet.accent = color,
                "border" => sheet.border = color,
                "muted" => sheet.muted = color,
                "warning" => sheet.warning = color,
                "critical" => sheet.critical = color,
                "highlight" => sheet.highlight = color,
                other => log::warn!("Ignoring unknown stylesheet slot '{}'", other),
            }
        }

        Ok(sheet)
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Gauge colour by usage threshold.
    pub fn usage_color(&self, percent: f64) -> Color {
        match percent {
            v if v < 75.0 => self.accent,
            v if v < 90.0 => self.warning,
            _ => self.critical,
        }
    }
}

/// Loads and applies named themes.
///
/// State is either "no theme applied" (`current_theme() == None`) or
/// "theme T applied". A failed apply leaves both the state and the shared
/// stylesheet untouched.
pub struct ThemeManager {
    themes_dir: PathBuf,
    current: Option<String>,
    stylesheet: SharedStylesheet,
}

impl ThemeManager {
    pub fn new(resource_root: &Path) -> Self {
        let themes_dir = resource_root.join("themes");
        log::info!("Theme manager using {:?}", themes_dir);

        Self {
            themes_dir,
            current: None,
            stylesheet: Arc::new(RwLock::new(Stylesheet::default())),
        }
    }

    pub fn available_themes(&self) -> Vec<&'static str> {
        THEMES.iter().map(|(name, _)| *name).collect()
    }

    pub fn current_theme(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Handle to the live stylesheet, read by the renderer each frame.
    pub fn stylesheet(&self) -> SharedStylesheet {
        self.stylesheet.clone()
    }

    /// Read and parse a theme without applying it.
    pub fn load_theme(&self, name: &str) -> Result<Stylesheet> {
        let file = THEMES
            .iter()
            .find(|(theme, _)| *theme == name)
            .map(|(_, file)| *file)
            .ok_or_else(|| TechSuiteError::UnknownTheme(name.to_string()))?;

        let path = self.themes_dir.join(file);
        let content = fs::read_to_string(&path).map_err(|e| {
            TechSuiteError::stylesheet(format!("failed to read {:?}: {}", path, e))
        })?;

        let sheet = Stylesheet::parse(&content)?;
        log::info!("Loaded theme: {} from {:?}", name, path);
        Ok(sheet)
    }

    pub fn apply(&mut self, name: &str) -> Result<()> {
        let sheet = self.load_theme(name).inspect_err(|e| {
            log::error!("Failed to apply theme {}: {}", name, e);
        })?;

        *self.stylesheet.write() = sheet;
        self.current = Some(name.to_string());
        log::info!("Applied theme: {}", name);
        Ok(())
    }

    /// Re-apply the current theme from disk.
    pub fn reload(&mut self) -> Result<()> {
        let current = self.current.clone().ok_or(TechSuiteError::NoThemeApplied)?;
        log::info!("Reloading theme: {}", current);
        self.apply(&current)
    }

    /// Apply the theme after the current one, wrapping around.
    pub fn cycle(&mut self) -> Result<String> {
        let names = self.available_themes();
        let next = match self
            .current
            .as_deref()
            .and_then(|c| names.iter().position(|n| *n == c))
        {
            Some(i) => names[(i + 1) % names.len()],
            None => names[0],
        };
        self.apply(next)?;
        Ok(next.to_string())
    }
}

/// Directory holding theme resources.
///
/// Resolution order: explicit override, `TECHSUITE_RESOURCES`, `resources/`
/// next to the executable, then `./resources`.
pub fn resolve_resource_root(override_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir;
    }

    if let Some(dir) = std::env::var_os("TECHSUITE_RESOURCES") {
        return PathBuf::from(dir);
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("resources")));

    match beside_exe {
        Some(dir) if dir.is_dir() => dir,
        _ => PathBuf::from("resources"),
    }
}
