//! Configuration file support for leaf
//!
//! Config file location: `~/.config/leaf/config.toml` (XDG_CONFIG_HOME)
//!
//! Example config:
//! ```toml
//! [ui]
//! zen = false
//! empty_placeholder = "None"
//! theme_mode = "dark"
//!
//! [ui.colors]
//! accent = "cyan"
//! label = "#7aa2f7"
//!
//! [data]
//! default_headers = ["First Name", "URL", "Email Address", "Company", "Position"]
//! ```

use ratatui::style::Color;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

/// Color overrides; any ratatui color name or `#rrggbb`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub text: Option<String>,
    pub text_muted: Option<String>,
    pub accent: Option<String>,
    pub label: Option<String>,
    pub link: Option<String>,
    pub error: Option<String>,
    pub border: Option<String>,
}

/// Resolved theme with all ratatui Colors ready to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub text: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub label: Color,
    pub link: Color,
    pub error: Color,
    pub border: Color,
}

impl Default for ResolvedTheme {
    fn default() -> Self {
        ColorConfig::default().resolve(false)
    }
}

impl ColorConfig {
    /// Resolve configured colors, falling back to per-mode defaults
    pub fn resolve(&self, light_mode: bool) -> ResolvedTheme {
        let resolve = |value: &Option<String>, dark: Color, light: Color| -> Color {
            value
                .as_deref()
                .and_then(parse_color)
                .unwrap_or(if light_mode { light } else { dark })
        };

        ResolvedTheme {
            text: resolve(&self.text, Color::Reset, Color::Black),
            text_muted: resolve(&self.text_muted, Color::DarkGray, Color::Gray),
            accent: resolve(&self.accent, Color::Cyan, Color::Blue),
            label: resolve(&self.label, Color::Gray, Color::DarkGray),
            link: resolve(&self.link, Color::Blue, Color::Blue),
            error: resolve(&self.error, Color::Red, Color::Red),
            border: resolve(&self.border, Color::DarkGray, Color::Gray),
        }
    }
}

fn parse_color(value: &str) -> Option<Color> {
    match Color::from_str(value.trim()) {
        Ok(color) => Some(color),
        Err(_) => {
            warn!(value, "ignoring unknown color");
            None
        }
    }
}

/// UI configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Start in zen mode (hide status and help bars)
    pub zen: bool,
    /// Text shown for blank values
    pub empty_placeholder: String,
    /// Theme mode: "dark" or "light"
    pub theme_mode: Option<String>,
    pub colors: ColorConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            zen: false,
            empty_placeholder: "None".to_string(),
            theme_mode: None,
            colors: ColorConfig::default(),
        }
    }
}

impl UiConfig {
    /// Check if config specifies light mode
    pub fn is_light_mode(&self) -> bool {
        self.theme_mode
            .as_ref()
            .map(|m| m.eq_ignore_ascii_case("light"))
            .unwrap_or(false)
    }
}

/// Data loading configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Headers for structured sources that carry bare rows
    pub default_headers: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            default_headers: leaf_core::default_headers(),
        }
    }
}

/// Root configuration
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub data: DataConfig,
}

impl Config {
    /// Get all possible config file paths in priority order
    fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("leaf").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("leaf").join("config.toml"));
        }

        // ~/Library/Application Support on macOS
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("leaf").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        paths
    }

    /// Get the first existing config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_paths().into_iter().find(|p| p.exists())
    }

    /// Load config from XDG config path
    /// Returns default config if file doesn't exist or can't be parsed
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load one config file, warning and falling back to defaults when it
    /// can't be read or parsed
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                eprintln!(
                    "Warning: Failed to read config {}: {}",
                    path.display(),
                    e
                );
                warn!(path = %path.display(), error = %e, "failed to read config");
                Self::default()
            }
        }
    }

    /// Parse config text, warning and falling back to defaults on error
    pub fn parse(content: &str) -> Self {
        toml::from_str(content)
            .map_err(|e| {
                eprintln!("Warning: Failed to parse config: {}", e);
                warn!(error = %e, "failed to parse config");
                e
            })
            .unwrap_or_default()
    }
}
