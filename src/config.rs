//! Configuration file support for ferro-idres.
//!
//! This module provides loading of `.idres.toml` configuration files
//! which can override the service endpoints the CLI talks to.
//!
//! # Example Configuration
//!
//! ```toml
//! [endpoints]
//! cdmi = "https://kbase.us/services/cdmi_api"
//! idmap = "https://kbase.us/services/id_map"
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.idres.toml` in current directory
//! 2. `~/.config/idres/config.toml`
//!
//! CLI flags take precedence over config file settings.

use std::fs;
use std::path::PathBuf;

use crate::error::IdResError;

/// Default central store (CDMI) endpoint.
pub const DEFAULT_CDMI_URL: &str = "https://kbase.us/services/cdmi_api";
/// Default id-map service endpoint.
pub const DEFAULT_IDMAP_URL: &str = "https://kbase.us/services/id_map";

/// Resolved service endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Central store (CDMI) URL.
    pub cdmi: String,
    /// Id-map service URL.
    pub idmap: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            cdmi: DEFAULT_CDMI_URL.to_string(),
            idmap: DEFAULT_IDMAP_URL.to_string(),
        }
    }
}

/// Parsed configuration from a .idres.toml file.
#[derive(Debug, Clone, Default)]
pub struct IdResConfig {
    /// Endpoint overrides.
    pub endpoints: EndpointConfig,
}

/// Endpoints section of the config file.
#[derive(Debug, Clone, Default)]
pub struct EndpointConfig {
    /// Central store URL override.
    pub cdmi: Option<String>,
    /// Id-map service URL override.
    pub idmap: Option<String>,
}

impl IdResConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.idres.toml` in current directory
    /// 2. `~/.config/idres/config.toml`
    pub fn load() -> Option<Self> {
        let cwd_config = PathBuf::from(".idres.toml");
        if cwd_config.exists() {
            if let Ok(config) = Self::load_from_path(&cwd_config) {
                return Some(config);
            }
        }

        if let Some(home) = dirs_home() {
            let home_config = home.join(".config").join("idres").join("config.toml");
            if home_config.exists() {
                if let Ok(config) = Self::load_from_path(&home_config) {
                    return Some(config);
                }
            }
        }

        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &PathBuf) -> Result<Self, IdResError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Parse configuration from TOML content.
    ///
    /// The format is a single flat section of string values, so this uses
    /// simple line parsing without a TOML dependency.
    pub fn parse(content: &str) -> Self {
        let mut config = IdResConfig::default();
        let mut in_endpoints = false;

        for line in content.lines() {
            let line = line.trim();

            if line.starts_with('#') || line.is_empty() {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let section = &line[1..line.len() - 1];
                in_endpoints = section == "endpoints";
                continue;
            }

            if !in_endpoints {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim().trim_matches('"').trim_matches('\'');

                match key {
                    "cdmi" => config.endpoints.cdmi = Some(value.to_string()),
                    "idmap" => config.endpoints.idmap = Some(value.to_string()),
                    _ => {}
                }
            }
        }

        config
    }

    /// Resolve endpoints from this config, falling back to the defaults.
    pub fn to_endpoints(&self) -> Endpoints {
        Endpoints {
            cdmi: self
                .endpoints
                .cdmi
                .clone()
                .unwrap_or_else(|| DEFAULT_CDMI_URL.to_string()),
            idmap: self
                .endpoints
                .idmap
                .clone()
                .unwrap_or_else(|| DEFAULT_IDMAP_URL.to_string()),
        }
    }

    /// Merge this config with CLI arguments.
    /// CLI arguments take precedence.
    pub fn merge_with_cli(&self, cli_cdmi: Option<&str>, cli_idmap: Option<&str>) -> Endpoints {
        let mut endpoints = self.to_endpoints();

        if let Some(url) = cli_cdmi {
            endpoints.cdmi = url.to_string();
        }
        if let Some(url) = cli_idmap {
            endpoints.idmap = url.to_string();
        }

        endpoints
    }
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
