//! Configuration loading and workspace root resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Contents of the optional `config.toml`
///
/// Everything is optional; missing values fall back to environment
/// variables and compiled defaults (see [`ServiceConfig::resolve`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Workspace root holding per-user directories and the database
    pub workspace_root: Option<String>,
    /// HTTP bind port for the event gateway
    pub bind_port: Option<u16>,
    /// Timeout applied to remote file retrieval, in seconds
    pub fetch_timeout_secs: Option<u64>,
    /// Largest audio upload accepted, in bytes
    pub max_audio_bytes: Option<u64>,
    /// Chat transport settings (opaque to the core)
    #[serde(default)]
    pub transport: TransportToml,
}

/// Transport section of the TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransportToml {
    /// Base URL for resolving relative file references
    pub api_base: Option<String>,
    /// Credential token appended to download requests
    pub token: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub workspace_root: PathBuf,
    pub bind_port: u16,
    pub fetch_timeout_secs: u64,
    pub max_audio_bytes: u64,
    pub transport_api_base: Option<String>,
    pub transport_token: Option<String>,
}

/// Workspace root resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_workspace_root(
    cli_arg: Option<&str>,
    toml_config: Option<&TomlConfig>,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("TAGBOT_ROOT") {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(root) = toml_config.and_then(|c| c.workspace_root.as_deref()) {
        return PathBuf::from(root);
    }

    // Priority 4: OS-dependent compiled default
    default_workspace_root()
}

/// Get default configuration file path for the platform
fn config_file_path() -> Option<PathBuf> {
    if cfg!(target_os = "linux") {
        // ~/.config/tagbot/config.toml first, then /etc/tagbot/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("tagbot").join("config.toml"));
        if let Some(path) = user_config {
            if path.exists() {
                return Some(path);
            }
        }
        let system_config = PathBuf::from("/etc/tagbot/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
        None
    } else {
        dirs::config_dir()
            .map(|d| d.join("tagbot").join("config.toml"))
            .filter(|p| p.exists())
    }
}

/// Get OS-dependent default workspace root path
fn default_workspace_root() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("tagbot"))
        .unwrap_or_else(|| PathBuf::from("./tagbot_data"))
}

/// Load the TOML config file if one exists
pub fn load_toml_config() -> Result<Option<TomlConfig>> {
    let Some(path) = config_file_path() else {
        debug!("No config file found, using defaults");
        return Ok(None);
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

    debug!("Loaded config file: {}", path.display());
    Ok(Some(config))
}

impl ServiceConfig {
    /// Resolve the full configuration from CLI arg, environment and TOML.
    ///
    /// Environment variables override the TOML file for every field:
    /// `TAGBOT_ROOT`, `TAGBOT_PORT`, `TAGBOT_FETCH_TIMEOUT_SECS`,
    /// `TAGBOT_MAX_AUDIO_BYTES`, `TAGBOT_TRANSPORT_BASE`, `TAGBOT_TRANSPORT_TOKEN`.
    pub fn resolve(cli_root: Option<&str>, toml_config: Option<TomlConfig>) -> Result<Self> {
        let toml_ref = toml_config.as_ref();

        let workspace_root = resolve_workspace_root(cli_root, toml_ref);

        let bind_port = match env_var("TAGBOT_PORT") {
            Some(v) => v
                .parse()
                .map_err(|_| Error::Config(format!("Invalid TAGBOT_PORT: {}", v)))?,
            None => toml_ref.and_then(|c| c.bind_port).unwrap_or(5731),
        };

        let fetch_timeout_secs = match env_var("TAGBOT_FETCH_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .map_err(|_| Error::Config(format!("Invalid TAGBOT_FETCH_TIMEOUT_SECS: {}", v)))?,
            None => toml_ref.and_then(|c| c.fetch_timeout_secs).unwrap_or(60),
        };

        let max_audio_bytes = match env_var("TAGBOT_MAX_AUDIO_BYTES") {
            Some(v) => v
                .parse()
                .map_err(|_| Error::Config(format!("Invalid TAGBOT_MAX_AUDIO_BYTES: {}", v)))?,
            None => toml_ref
                .and_then(|c| c.max_audio_bytes)
                .unwrap_or(48_000_000),
        };

        let transport_api_base = env_var("TAGBOT_TRANSPORT_BASE")
            .or_else(|| toml_ref.and_then(|c| c.transport.api_base.clone()));
        let transport_token = env_var("TAGBOT_TRANSPORT_TOKEN")
            .or_else(|| toml_ref.and_then(|c| c.transport.token.clone()));

        Ok(Self {
            workspace_root,
            bind_port,
            fetch_timeout_secs,
            max_audio_bytes,
            transport_api_base,
            transport_token,
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
