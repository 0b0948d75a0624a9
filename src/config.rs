//! TOML-based configuration system.
//!
//! Loads settings from a `config.toml` file, falling back to compiled-in
//! defaults. Every struct implements `Default` so a missing or partial config
//! file produces the same window as no file at all. The configuration is read
//! once at startup and never written back.
//!
//! ## Config file search order
//!
//! 1. Next to the executable (`<exe_dir>/config.toml`)
//! 2. Platform config directory (`%APPDATA%\webpane\config.toml` on Windows,
//!    `$XDG_CONFIG_HOME/webpane/config.toml` elsewhere)
//! 3. Current working directory (`./config.toml`)
//! 4. No file found → `Config::default()`

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::lifecycle::{LaunchSettings, WindowSize};

/// Page loaded when nothing else is configured.
pub const DEFAULT_URL: &str = "https://example.com";

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

// ─────────────────────────────────────────────────────────────────────────────
// Config structs
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub window: WindowConfig,
    pub engine: EngineConfig,
}

/// What to show and how to name the window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub url: String,
    pub window_title: String,
}

/// Initial client-area size, in logical pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

/// Servo engine tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum layout threads. 0 = auto-detect from CPU count.
    pub layout_threads: i64,
    /// HTTP cache size in bytes.
    pub cache_size: i64,
    /// User-agent string. Empty = engine default.
    pub user_agent: String,
    /// Pre-cache GPU shaders at startup.
    pub precache_shaders: bool,
    /// Explicit location of Servo's `resources/` directory.
    pub resources_path: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            window_title: "webpane".to_string(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout_threads: 0,
            cache_size: 50_000,
            user_agent: String::new(),
            precache_shaders: true,
            resources_path: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Loads configuration from a TOML file. Never panics — returns defaults
    /// if no file is found or if parsing fails.
    pub fn load() -> Self {
        let Some(path) = find_config_path() else {
            info!("No config file found, using defaults");
            return Config::default();
        };

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<Config>(&content) {
                Ok(config) => {
                    info!(path = %path.display(), "Configuration loaded");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                    Config::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot read config, using defaults");
                Config::default()
            }
        }
    }

    /// Resolves the validated, fixed settings of this run.
    pub fn launch_settings(&self) -> LaunchSettings {
        LaunchSettings {
            title: self.general.window_title.clone(),
            size: self.window_size(),
            url: parse_target_url(&self.general.url),
        }
    }

    fn window_size(&self) -> WindowSize {
        WindowSize::new(self.window.width, self.window.height).unwrap_or_else(|| {
            warn!(
                width = self.window.width,
                height = self.window.height,
                "Window size must be positive, using defaults"
            );
            default_window_size()
        })
    }
}

fn default_window_size() -> WindowSize {
    WindowSize::new(DEFAULT_WIDTH, DEFAULT_HEIGHT).expect("default window size is non-zero")
}

/// Parses the configured URL, adding `https://` when the scheme is missing.
/// Falls back to [`DEFAULT_URL`] if nothing sensible comes out.
fn parse_target_url(input: &str) -> Url {
    let input = input.trim();

    if let Ok(url) = Url::parse(input)
        && url.has_host()
    {
        return url;
    }

    if let Ok(url) = Url::parse(&format!("https://{input}"))
        && url.host_str().is_some_and(|h| !h.is_empty())
    {
        return url;
    }

    warn!(url = input, fallback = DEFAULT_URL, "Invalid URL in config");
    default_url()
}

fn default_url() -> Url {
    Url::parse(DEFAULT_URL).expect("DEFAULT_URL is a valid URL")
}

/// Searches for a config file in the standard locations.
fn find_config_path() -> Option<PathBuf> {
    // 1. Next to the executable
    if let Ok(exe) = std::env::current_exe()
        && let Some(dir) = exe.parent()
    {
        let p = dir.join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    // 2. Platform config directory
    if let Some(dir) = platform_config_dir() {
        let p = dir.join("config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    // 3. Current working directory
    let p = PathBuf::from("config.toml");
    if p.is_file() {
        return Some(p);
    }

    None
}

/// Returns the platform config directory without adding a dependency.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join("webpane"))
    }
    #[cfg(not(windows))]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .or_else(|| std::env::var("HOME").ok().map(|h| format!("{h}/.config")))
            .map(|dir| PathBuf::from(dir).join("webpane"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Config::default();
        assert_eq!(c.general.url, "https://example.com");
        assert_eq!(c.general.window_title, "webpane");
        assert_eq!(c.window.width, 800);
        assert_eq!(c.window.height, 600);
        assert_eq!(c.engine.layout_threads, 0);
        assert_eq!(c.engine.cache_size, 50_000);
        assert!(c.engine.user_agent.is_empty());
        assert!(c.engine.resources_path.is_none());
    }

    #[test]
    fn test_empty_toml_returns_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.general.url, "https://example.com");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml = r#"
[window]
width = 1024

[engine]
resources_path = "/opt/servo/resources"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600); // default
        assert_eq!(
            config.engine.resources_path,
            Some(PathBuf::from("/opt/servo/resources"))
        );
        assert!(config.engine.precache_shaders); // default
    }

    #[test]
    fn test_default_launch_settings() {
        let settings = Config::default().launch_settings();
        assert_eq!(settings.title, "webpane");
        assert_eq!(settings.size, WindowSize::new(800, 600).unwrap());
        assert_eq!(settings.url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_zero_size_falls_back_to_default() {
        let mut config = Config::default();
        config.window.width = 0;
        config.window.height = 900;
        assert_eq!(
            config.launch_settings().size,
            WindowSize::new(800, 600).unwrap()
        );
    }

    #[test]
    fn test_url_without_scheme_gets_https() {
        assert_eq!(parse_target_url("wikipedia.org").as_str(), "https://wikipedia.org/");
        assert_eq!(
            parse_target_url("  servo.org/about  ").as_str(),
            "https://servo.org/about"
        );
    }

    #[test]
    fn test_url_with_scheme_is_kept() {
        assert_eq!(
            parse_target_url("http://localhost:8080/app").as_str(),
            "http://localhost:8080/app"
        );
    }

    #[test]
    fn test_unusable_url_falls_back_to_default() {
        assert_eq!(parse_target_url("").as_str(), "https://example.com/");
        assert_eq!(parse_target_url("   ").as_str(), "https://example.com/");
        assert_eq!(parse_target_url("://").as_str(), "https://example.com/");
    }

    #[test]
    fn test_platform_config_dir_ends_with_app_name() {
        if let Some(dir) = platform_config_dir() {
            assert!(dir.ends_with("webpane"));
        }
    }
}
