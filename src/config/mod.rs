//
//  mandrill-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads and saves the CLI's settings from a TOML file stored in the
//! platform-specific configuration directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/mandrill/config.toml`
//! - **macOS**: `~/Library/Application Support/mandrill/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\mandrill\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [api]
//! host = "https://mandrillapp.com"
//! path = "/api/1.0/"
//! debug = false
//! ```
//!
//! The API key is not stored here. It is resolved by
//! [`crate::auth::resolve_api_key`] from the command line, the environment,
//! or a key file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mandrill_cli::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("debug", "true")?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default API host.
pub const DEFAULT_HOST: &str = "https://mandrillapp.com";

/// Default API base path.
pub const DEFAULT_PATH: &str = "/api/1.0/";

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &["host", "path", "debug"];

/// Global configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Endpoint settings used to build a [`crate::api::MandrillClient`].
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `host` | `"https://mandrillapp.com"` |
/// | `path` | `"/api/1.0/"` |
/// | `debug` | `false` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme and authority of the API server, without a trailing slash.
    #[serde(default = "default_host")]
    pub host: String,

    /// Base path prepended to every operation path. Starts and ends with `/`.
    #[serde(default = "default_path")]
    pub path: String,

    /// Log response bodies at debug level.
    #[serde(default)]
    pub debug: bool,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            path: default_path(),
            debug: false,
        }
    }
}

impl ApiConfig {
    /// Checks that the host is an absolute `http`/`https` URL with no path,
    /// and that the base path starts and ends with `/`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mandrill_cli::config::ApiConfig;
    ///
    /// assert!(ApiConfig::default().validate().is_ok());
    ///
    /// let bad = ApiConfig { host: "mandrillapp.com".into(), ..Default::default() };
    /// assert!(bad.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.host)
            .with_context(|| format!("Invalid API host '{}'", self.host))?;

        if !matches!(url.scheme(), "http" | "https") {
            bail!("API host must use http or https, got '{}'", url.scheme());
        }
        if url.host_str().is_none() {
            bail!("API host '{}' has no hostname", self.host);
        }
        if url.path() != "/" || self.host.ends_with('/') {
            bail!("API host '{}' must not include a path or trailing slash", self.host);
        }
        if !self.path.starts_with('/') || !self.path.ends_with('/') {
            bail!("API path '{}' must start and end with '/'", self.path);
        }

        Ok(())
    }
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing configuration file is not an error; defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to an explicit path, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Returns the path to the configuration file.
    ///
    /// The file may not exist; this only returns where it would be.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Gets a configuration value by key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mandrill_cli::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.get("path"), Some("/api/1.0/".to_string()));
    /// assert_eq!(config.get("unknown_key"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "host" => Some(self.api.host.clone()),
            "path" => Some(self.api.path.clone()),
            "debug" => Some(self.api.debug.to_string()),
            _ => None,
        }
    }

    /// Sets a configuration value by key.
    ///
    /// Changes are only persisted when [`Config::save`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys, non-boolean `debug` values, or a
    /// resulting endpoint that fails [`ApiConfig::validate`]. On error the
    /// configuration is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut api = self.api.clone();
        match key {
            "host" => api.host = value.trim_end_matches('/').to_string(),
            "path" => api.path = value.to_string(),
            "debug" => {
                api.debug = value
                    .parse()
                    .with_context(|| format!("Invalid value for debug: '{value}'. Valid values: true, false"))?;
            }
            _ => bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        api.validate()?;
        self.api = api;
        Ok(())
    }
}
