//! User configuration loading from `~/.searchbar/config.toml`.

use crate::ui::theme::ThemePalette;
use crate::widget::controller::{DEFAULT_CLOSE_ICON, DEFAULT_PLACEHOLDER, DEFAULT_SEARCH_ICON};
use anyhow::{Context, Result, anyhow};
use ratatui::style::Color;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR: &str = ".searchbar";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "searchbar.log";

const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(250);

const DEFAULT_CONFIG_TOML: &str = r##"# searchbar configuration
# Colors accept `#RRGGBB` or named ANSI colors (e.g. "yellow", "dark_gray").

[search_bar]
placeholder = "Search"
search_icon = "🔍"
close_icon = "✕"
cancel_on_escape = false
full_width = false
# How long the demo host takes to answer a search request.
search_delay = "250ms"

[theme]
border = "#c47832"
focused_border = "yellow"
title = "#ebaa5a"
dim = "dark_gray"
text = "#d2d2c8"
placeholder = "dark_gray"
cursor = "#f5cd52"
trigger = "cyan"
selected_fg = "black"
selected_bg = "#e2b45c"
error = "red"
info = "cyan"
hint_key = "yellow"
"##;

/// Application configuration loaded from disk.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub theme: ThemePalette,
    pub search_bar: SearchBarDefaults,
}

/// Search bar settings applied before command-line overrides.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SearchBarDefaults {
    pub placeholder: String,
    pub search_icon: String,
    pub close_icon: String,
    pub cancel_on_escape: bool,
    pub full_width: bool,
    pub search_delay: Duration,
}

impl Default for SearchBarDefaults {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            search_icon: DEFAULT_SEARCH_ICON.to_owned(),
            close_icon: DEFAULT_CLOSE_ICON.to_owned(),
            cancel_on_escape: false,
            full_width: false,
            search_delay: DEFAULT_SEARCH_DELAY,
        }
    }
}

/// Returns the config file path and creates default config if missing.
pub fn ensure_config_file() -> Result<PathBuf> {
    let path = config_path()?;
    ensure_default_config(&path)?;
    Ok(path)
}

/// Loads configuration from `~/.searchbar/config.toml`, creating defaults if missing.
pub fn load_or_create() -> Result<AppConfig> {
    let path = ensure_config_file()?;
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;

    parse_config(&content).with_context(|| format!("invalid config in {}", path.display()))
}

/// Returns the log file path next to the config file.
pub fn log_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(LOG_FILE))
}

fn parse_config(content: &str) -> Result<AppConfig> {
    let raw: RawConfig = toml::from_str(content).context("failed to parse TOML")?;

    Ok(AppConfig {
        theme: raw.theme.into_theme()?,
        search_bar: raw.search_bar.into_defaults()?,
    })
}

fn config_dir() -> Result<PathBuf> {
    let home =
        env::var_os("HOME").ok_or_else(|| anyhow!("HOME environment variable is not set"))?;
    Ok(PathBuf::from(home).join(CONFIG_DIR))
}

fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

fn ensure_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    let dir = path
        .parent()
        .ok_or_else(|| anyhow!("invalid config path: {}", path.display()))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    fs::write(path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("failed to write default config file {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    search_bar: RawSearchBar,
    theme: RawTheme,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSearchBar {
    placeholder: Option<String>,
    search_icon: Option<String>,
    close_icon: Option<String>,
    cancel_on_escape: Option<bool>,
    full_width: Option<bool>,
    search_delay: Option<String>,
}

impl RawSearchBar {
    fn into_defaults(self) -> Result<SearchBarDefaults> {
        let defaults = SearchBarDefaults::default();
        let search_delay = match self.search_delay {
            Some(raw) => humantime::parse_duration(raw.trim())
                .with_context(|| format!("invalid duration for `search_bar.search_delay`: {raw}"))?,
            None => defaults.search_delay,
        };

        Ok(SearchBarDefaults {
            placeholder: self.placeholder.unwrap_or(defaults.placeholder),
            search_icon: self.search_icon.unwrap_or(defaults.search_icon),
            close_icon: self.close_icon.unwrap_or(defaults.close_icon),
            cancel_on_escape: self.cancel_on_escape.unwrap_or(defaults.cancel_on_escape),
            full_width: self.full_width.unwrap_or(defaults.full_width),
            search_delay,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawTheme {
    border: Option<String>,
    focused_border: Option<String>,
    title: Option<String>,
    dim: Option<String>,
    text: Option<String>,
    placeholder: Option<String>,
    cursor: Option<String>,
    trigger: Option<String>,
    selected_fg: Option<String>,
    selected_bg: Option<String>,
    error: Option<String>,
    info: Option<String>,
    hint_key: Option<String>,
}

impl RawTheme {
    fn into_theme(self) -> Result<ThemePalette> {
        let defaults = ThemePalette::default();

        Ok(ThemePalette {
            border: parse_or_default(self.border, defaults.border, "theme.border")?,
            focused_border: parse_or_default(
                self.focused_border,
                defaults.focused_border,
                "theme.focused_border",
            )?,
            title: parse_or_default(self.title, defaults.title, "theme.title")?,
            dim: parse_or_default(self.dim, defaults.dim, "theme.dim")?,
            text: parse_or_default(self.text, defaults.text, "theme.text")?,
            placeholder: parse_or_default(
                self.placeholder,
                defaults.placeholder,
                "theme.placeholder",
            )?,
            cursor: parse_or_default(self.cursor, defaults.cursor, "theme.cursor")?,
            trigger: parse_or_default(self.trigger, defaults.trigger, "theme.trigger")?,
            selected_fg: parse_or_default(
                self.selected_fg,
                defaults.selected_fg,
                "theme.selected_fg",
            )?,
            selected_bg: parse_or_default(
                self.selected_bg,
                defaults.selected_bg,
                "theme.selected_bg",
            )?,
            error: parse_or_default(self.error, defaults.error, "theme.error")?,
            info: parse_or_default(self.info, defaults.info, "theme.info")?,
            hint_key: parse_or_default(self.hint_key, defaults.hint_key, "theme.hint_key")?,
        })
    }
}

fn parse_or_default(value: Option<String>, default: Color, field: &str) -> Result<Color> {
    match value {
        Some(raw) => parse_color(raw.trim())
            .with_context(|| format!("invalid color value for `{field}`: {raw}")),
        None => Ok(default),
    }
}

fn parse_color(raw: &str) -> Result<Color> {
    if let Some(hex) = raw.strip_prefix('#') {
        if hex.len() != 6 {
            return Err(anyhow!("hex colors must be in #RRGGBB format"));
        }
        let red = u8::from_str_radix(&hex[0..2], 16).context("invalid red hex channel")?;
        let green = u8::from_str_radix(&hex[2..4], 16).context("invalid green hex channel")?;
        let blue = u8::from_str_radix(&hex[4..6], 16).context("invalid blue hex channel")?;
        return Ok(Color::Rgb(red, green, blue));
    }

    let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    let color = match normalized.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" => Color::DarkGray,
        "light_red" => Color::LightRed,
        "light_green" => Color::LightGreen,
        "light_yellow" => Color::LightYellow,
        "light_blue" => Color::LightBlue,
        "light_magenta" => Color::LightMagenta,
        "light_cyan" => Color::LightCyan,
        "white" => Color::White,
        _ => return Err(anyhow!("unsupported color format")),
    };

    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_CONFIG_TOML, SearchBarDefaults, parse_color, parse_config};
    use ratatui::style::Color;
    use std::time::Duration;

    #[test]
    fn parse_color_supports_hex() {
        assert_eq!(
            parse_color("#112233").unwrap(),
            Color::Rgb(0x11, 0x22, 0x33)
        );
        assert!(parse_color("#1122").is_err());
    }

    #[test]
    fn parse_color_supports_named_values() {
        assert_eq!(parse_color("light_yellow").unwrap(), Color::LightYellow);
        assert_eq!(parse_color("dark-gray").unwrap(), Color::DarkGray);
    }

    #[test]
    fn default_config_parses_to_defaults() {
        let config = parse_config(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config.search_bar, SearchBarDefaults::default());
    }

    #[test]
    fn search_bar_section_overrides_defaults() {
        let config = parse_config(
            r#"
[search_bar]
placeholder = "Find crates"
cancel_on_escape = true
search_delay = "1s 500ms"
"#,
        )
        .unwrap();

        assert_eq!(config.search_bar.placeholder, "Find crates");
        assert!(config.search_bar.cancel_on_escape);
        assert!(!config.search_bar.full_width);
        assert_eq!(config.search_bar.search_delay, Duration::from_millis(1500));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(parse_config("[search_bar]\nsearch_delay = \"soon\"\n").is_err());
        assert!(parse_config("[theme]\nborder = \"#zzzzzz\"\n").is_err());
    }
}
