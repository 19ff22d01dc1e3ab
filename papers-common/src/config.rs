//! Configuration loading
//!
//! Each setting is resolved independently, in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing or broken config file is never fatal; it is logged and the
//! remaining tiers apply.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{Error, Result};

pub const DEFAULT_DATA_FILE: &str = "data/all_papers.json";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5730";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 10 * 60;

pub const ENV_DATA_FILE: &str = "PAPERS_DATA_FILE";
pub const ENV_BIND_ADDR: &str = "PAPERS_BIND";
pub const ENV_CACHE_TTL_SECS: &str = "PAPERS_CACHE_TTL_SECS";

/// Contents of `config.toml`; every key optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TomlConfig {
    pub data_file: Option<PathBuf>,
    pub bind: Option<String>,
    pub cache_ttl_secs: Option<u64>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub data_file: Option<PathBuf>,
    pub bind: Option<String>,
    pub cache_ttl_secs: Option<u64>,
    /// Explicit config file; skips the platform search
    pub config_file: Option<PathBuf>,
}

/// Fully resolved service settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub data_file: PathBuf,
    pub bind_addr: String,
    pub cache_ttl: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl ServiceConfig {
    /// Resolve settings from CLI overrides, environment, config file and defaults
    pub fn resolve(overrides: ConfigOverrides) -> Self {
        let toml = match load_toml_config(overrides.config_file.as_deref()) {
            Ok(Some(config)) => config,
            Ok(None) => {
                debug!("No config file found, using environment and defaults");
                TomlConfig::default()
            }
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                TomlConfig::default()
            }
        };
        Self::from_sources(overrides, EnvConfig::from_env(), toml)
    }

    /// Merge already-collected sources; highest priority first
    pub fn from_sources(cli: ConfigOverrides, env: EnvConfig, toml: TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            data_file: cli
                .data_file
                .or(env.data_file)
                .or(toml.data_file)
                .unwrap_or(defaults.data_file),
            bind_addr: cli
                .bind
                .or(env.bind)
                .or(toml.bind)
                .unwrap_or(defaults.bind_addr),
            cache_ttl: cli
                .cache_ttl_secs
                .or(env.cache_ttl_secs)
                .or(toml.cache_ttl_secs)
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
        }
    }
}

/// Settings taken from `PAPERS_*` environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub data_file: Option<PathBuf>,
    pub bind: Option<String>,
    pub cache_ttl_secs: Option<u64>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        let cache_ttl_secs = non_empty_env(ENV_CACHE_TTL_SECS).and_then(|v| match v.parse() {
            Ok(secs) => Some(secs),
            Err(_) => {
                warn!("Ignoring {}={:?}: not a number of seconds", ENV_CACHE_TTL_SECS, v);
                None
            }
        });
        Self {
            data_file: non_empty_env(ENV_DATA_FILE).map(PathBuf::from),
            bind: non_empty_env(ENV_BIND_ADDR),
            cache_ttl_secs,
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Load the TOML config file
///
/// With an explicit path the file must exist. Without one, the platform
/// locations are searched and `Ok(None)` means none was found.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<Option<TomlConfig>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => return Ok(None),
        },
    };

    let content = std::fs::read_to_string(&path)?;
    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    debug!("Loaded config file {}", path.display());
    Ok(Some(config))
}

/// First existing config file among the platform locations
fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("papers").join("config.toml"));
    let system_config = if cfg!(unix) {
        Some(PathBuf::from("/etc/papers/config.toml"))
    } else {
        None
    };

    [user_config, system_config]
        .into_iter()
        .flatten()
        .find(|p| p.exists())
}
