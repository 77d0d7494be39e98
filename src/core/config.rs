//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! compiled-in defaults → config file → CLI flags.
//!
//! Config lives at `~/.medchat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! No environment variables are consulted; the backend address is the
//! compiled-in constant unless the file or a flag overrides it.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::transport::Timeouts;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MedchatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub base_url: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TimeoutConfig {
    pub connect_secs: Option<u64>,
    pub read_secs: Option<u64>,
    pub write_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

/// Hosted backend. Local development uses `http://localhost:8000`.
pub const DEFAULT_BASE_URL: &str = "https://hongzhizhu-medical-backend.onrender.com";
pub const DEFAULT_LOG_FILE: &str = "medchat.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Immutable settings handed to the transport and UI at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeouts: Timeouts,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

/// Overrides collected from the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
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

/// Returns the path to `~/.medchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".medchat").join("config.toml"))
}

/// Load config from `path`, or from `~/.medchat/config.toml` when `None`.
///
/// A missing default file is generated (commented out) and yields
/// `MedchatConfig::default()`. An explicitly given path that does not exist
/// is an I/O error.
pub fn load_config(path: Option<&Path>) -> Result<MedchatConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => {
                if !p.exists() {
                    info!("No config file found, generating default at {}", p.display());
                    generate_default_config(&p);
                    return Ok(MedchatConfig::default());
                }
                p
            }
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(MedchatConfig::default());
            }
        },
    };

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: MedchatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# medchat configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → CLI flags.

# [general]
# base_url = "https://hongzhizhu-medical-backend.onrender.com"
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"
# log_file = "medchat.log"

# [timeouts]
# connect_secs = 30                  # the hosted backend needs 30-60s to wake up
# read_secs = 60
# write_secs = 30
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

/// Resolve the final config by collapsing: defaults → config file → CLI.
pub fn resolve(config: &MedchatConfig, cli: &CliOverrides) -> ResolvedConfig {
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| config.general.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let defaults = Timeouts::default();
    let secs_or = |value: Option<u64>, default: Duration| {
        value.map(Duration::from_secs).unwrap_or(default)
    };
    let timeouts = Timeouts {
        connect: secs_or(config.timeouts.connect_secs, defaults.connect),
        read: secs_or(config.timeouts.read_secs, defaults.read),
        write: secs_or(config.timeouts.write_secs, defaults.write),
    };

    let log_level = match config.general.log_level.as_deref() {
        Some(level) => level.parse().unwrap_or_else(|_| {
            warn!("Unknown log level '{}', using {}", level, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    ResolvedConfig {
        base_url,
        timeouts,
        log_level,
        log_file: PathBuf::from(
            config
                .general
                .log_file
                .as_deref()
                .unwrap_or(DEFAULT_LOG_FILE),
        ),
    }
}
