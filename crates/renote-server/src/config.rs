//! Configuration file support.
//!
//! Configuration is read from `--config <path>` when given, otherwise from
//! `~/.config/renote/renote.toml` (XDG standard) or
//! `~/Library/Application Support/com.renote.renote/renote.toml` on macOS.
//! A missing default file is not an error.
//!
//! # Example configuration
//!
//! ```toml
//! root = "/workspace/workbase"
//! display_prefix = "/workspace"
//! bind_address = "0.0.0.0"
//! port = 6066
//! ```

use crate::server::ServerConfig;
use anyhow::{Context, Result};
use renote_core::DEFAULT_DISPLAY_PREFIX;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

/// Default workspace root.
pub const DEFAULT_ROOT: &str = "/workspace/workbase";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 6066;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Directory served as the workspace root.
    pub root: PathBuf,
    /// UI-facing prefix stripped from client paths and added to responses.
    pub display_prefix: String,
    /// Address to listen on.
    pub bind_address: IpAddr,
    /// Port to listen on.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            display_prefix: DEFAULT_DISPLAY_PREFIX.to_string(),
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used if present, and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = config_path()?;
                if !path.exists() {
                    return Ok(Config::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text. Missing keys take their defaults.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Listener settings derived from this configuration.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            port: self.port,
            bind_address: self.bind_address,
        }
    }
}

/// Get the path to the configuration file.
///
/// Uses XDG config directory on Linux, Application Support on macOS.
pub fn config_path() -> Result<PathBuf> {
    let base_dirs = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

    #[cfg(target_os = "macos")]
    {
        let config_dir = base_dirs
            .home_dir()
            .join("Library/Application Support/com.renote.renote");
        Ok(config_dir.join("renote.toml"))
    }

    #[cfg(not(target_os = "macos"))]
    {
        let config_dir = base_dirs.config_dir().join("renote");
        Ok(config_dir.join("renote.toml"))
    }
}
