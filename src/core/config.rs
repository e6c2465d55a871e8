//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.wayfinder/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! The `[[routes]]` tables declare the route tree the demo renders.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::route::RouteSpec;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WayfinderConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub routes: Vec<RouteDecl>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub initial_route: Option<String>,
    pub log_level: Option<String>,
    pub transition_ms: Option<u64>,
    pub persist_history: Option<bool>,
}

/// Declarative route entry: a `screen` or nested `children`, not both.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteDecl {
    pub name: String,
    pub screen: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteDecl>,
    pub params_schema: Option<Value>,
}

impl RouteDecl {
    /// Convert into the route tree's declarative input. Shape validation is
    /// left to `RouteTree::build`.
    pub fn into_spec(self) -> RouteSpec<String> {
        let children = self.children.into_iter().map(RouteDecl::into_spec).collect();
        let mut spec = RouteSpec::group(self.name, children);
        spec.unit = self.screen;
        spec.params_schema = self.params_schema;
        spec
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TRANSITION_MS: u64 = 250;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub initial_route: Option<String>,
    pub log_level: LevelFilter,
    pub transition_ms: u64,
    pub persist_history: bool,
    pub routes: Vec<RouteDecl>,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub initial_route: Option<String>,
    pub log_level: Option<String>,
    pub no_persist: bool,
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

/// Returns `~/.wayfinder`.
pub fn wayfinder_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".wayfinder"))
}

/// Returns the path to `~/.wayfinder/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    wayfinder_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.wayfinder/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WayfinderConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<WayfinderConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(WayfinderConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<WayfinderConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(WayfinderConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: WayfinderConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Wayfinder Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# initial_route = "home"        # Or set WAYFINDER_INITIAL_ROUTE
# log_level = "info"            # "off", "error", "warn", "info", "debug", "trace"
# transition_ms = 250           # Fade duration between screens
# persist_history = true        # Restore history from ~/.wayfinder/history.json

# Each route has a `screen` (text shown when focused) or `children`, never both.
# [[routes]]
# name = "home"
# screen = "Welcome home."

# [[routes]]
# name = "settings"
#
# [[routes.children]]
# name = "display"
# screen = "Display settings."
#
# [[routes.children]]
# name = "sound"
# screen = "Sound settings."
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

fn parse_level(raw: &str) -> Option<LevelFilter> {
    match LevelFilter::from_str(raw.trim()) {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("Ignoring unknown log level '{}'", raw);
            None
        }
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &WayfinderConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Initial route: CLI → env → config → first declared leaf (decided later)
    let initial_route = cli
        .initial_route
        .clone()
        .or_else(|| std::env::var("WAYFINDER_INITIAL_ROUTE").ok())
        .or_else(|| config.general.initial_route.clone());

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .as_deref()
        .and_then(parse_level)
        .or_else(|| {
            std::env::var("WAYFINDER_LOG_LEVEL")
                .ok()
                .as_deref()
                .and_then(parse_level)
        })
        .or_else(|| config.general.log_level.as_deref().and_then(parse_level))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        initial_route,
        log_level,
        transition_ms: config
            .general
            .transition_ms
            .unwrap_or(DEFAULT_TRANSITION_MS),
        persist_history: !cli.no_persist && config.general.persist_history.unwrap_or(true),
        routes: config.routes.clone(),
    }
}
