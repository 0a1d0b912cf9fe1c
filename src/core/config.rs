//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.menutree/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::BackPolicy;
use crate::core::navigator::{DEFAULT_BACK_DESCRIPTION, DEFAULT_BACK_LABEL, NavigatorOptions};
use crate::core::surface::SurfaceLayout;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MenuTreeConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LayoutConfig {
    pub rows: Option<u16>,
    pub columns: Option<u16>,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub x: Option<u16>,
    pub y: Option<u16>,
    pub mark: Option<String>,
    pub show_descriptions: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigationConfig {
    pub back_policy: Option<BackPolicy>,
    pub back_label: Option<String>,
    pub back_description: Option<String>,
    pub poll_interval_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_LOG_FILE: &str = "menutree.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub layout: SurfaceLayout,
    pub back_policy: BackPolicy,
    pub back_label: String,
    pub back_description: String,
    pub poll_interval: Duration,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl ResolvedConfig {
    pub fn navigator_options(&self) -> NavigatorOptions {
        NavigatorOptions {
            layout: self.layout.clone(),
            back_policy: self.back_policy,
            back_label: self.back_label.clone(),
            back_description: self.back_description.clone(),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.menutree/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".menutree").join("config.toml"))
}

/// Load config from `~/.menutree/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MenuTreeConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MenuTreeConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MenuTreeConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MenuTreeConfig::default());
    }

    load_config_from(&path)
}

/// Load an explicit config file (`--config`). Unlike [`load_config`], a
/// missing file is an error.
pub fn load_config_from(path: &Path) -> Result<MenuTreeConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MenuTreeConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG: &str = r#"# menutree configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [layout]
# rows = 4                    # visible grid rows
# columns = 2                 # items per row
# width = 75                  # menu box size, in cells
# height = 10
# x = 4                       # top-left corner
# y = 4
# mark = " * "                # drawn before the highlighted item
# show_descriptions = false

# [navigation]
# back_policy = "first-parent"  # "first-parent", "exclusive", "stack"
# back_label = "Back"
# back_description = "Go back to previous menu"
# poll_interval_ms = 100

# [logging]
# level = "debug"             # "off", "error", "warn", "info", "debug", "trace"
# file = "menutree.log"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_back_policy` and `cli_log_level` are from CLI flags (None = not specified).
pub fn resolve(
    config: &MenuTreeConfig,
    cli_back_policy: Option<BackPolicy>,
    cli_log_level: Option<LevelFilter>,
) -> ResolvedConfig {
    let defaults = SurfaceLayout::default();
    let layout = SurfaceLayout {
        rows: config.layout.rows.unwrap_or(defaults.rows),
        columns: config.layout.columns.unwrap_or(defaults.columns),
        width: config.layout.width.unwrap_or(defaults.width),
        height: config.layout.height.unwrap_or(defaults.height),
        x: config.layout.x.unwrap_or(defaults.x),
        y: config.layout.y.unwrap_or(defaults.y),
        mark: config.layout.mark.clone().unwrap_or(defaults.mark),
        show_descriptions: config
            .layout
            .show_descriptions
            .unwrap_or(defaults.show_descriptions),
    };

    // Back policy: CLI → env → config → default
    let back_policy = cli_back_policy
        .or_else(env_back_policy)
        .or(config.navigation.back_policy)
        .unwrap_or_default();

    // Log level: CLI → env → config → default
    let log_level = cli_log_level
        .or_else(|| std::env::var("MENUTREE_LOG_LEVEL").ok().and_then(|s| parse_level(&s)))
        .or_else(|| config.logging.level.as_deref().and_then(parse_level))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: env → config → default
    let log_file = std::env::var("MENUTREE_LOG_FILE")
        .ok()
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        layout,
        back_policy,
        back_label: config
            .navigation
            .back_label
            .clone()
            .unwrap_or_else(|| DEFAULT_BACK_LABEL.to_string()),
        back_description: config
            .navigation
            .back_description
            .clone()
            .unwrap_or_else(|| DEFAULT_BACK_DESCRIPTION.to_string()),
        poll_interval: Duration::from_millis(
            config
                .navigation
                .poll_interval_ms
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS)
                .max(1),
        ),
        log_level,
        log_file: PathBuf::from(log_file),
    }
}

fn env_back_policy() -> Option<BackPolicy> {
    let raw = std::env::var("MENUTREE_BACK_POLICY").ok()?;
    match <BackPolicy as clap::ValueEnum>::from_str(&raw, true) {
        Ok(policy) => Some(policy),
        Err(e) => {
            warn!("Ignoring MENUTREE_BACK_POLICY: {e}");
            None
        }
    }
}

/// Parse a log level name, case-insensitively. Unknown names are ignored.
pub fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.parse::<LevelFilter>() {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("Unknown log level {s:?}, ignoring");
            None
        }
    }
}
