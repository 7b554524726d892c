//
//  bitbucket-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads and saves the `bbc` configuration: the OAuth consumer, API endpoint
//! settings and default namespace/repository. Access tokens are not stored
//! here; they live in the system keyring (see [`crate::auth::TokenStore`]).
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bbc/config.toml`
//! - **macOS**: `~/Library/Application Support/bbc/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bbc\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [oauth]
//! consumer_key = "AbCdEf123"
//! consumer_secret = "s3cr3t"
//! callback_url = "oob"
//!
//! [api]
//! base_url = "https://api.bitbucket.org/2.0/"
//! timeout_secs = 30
//!
//! [defaults]
//! namespace = "myteam"
//! repository = "backend"
//! ```
//!
//! ## Keys
//!
//! `get`/`set` address settings as `section.name`:
//!
//! | Key | Default |
//! |-----|---------|
//! | `oauth.consumer_key` | unset |
//! | `oauth.consumer_secret` | unset |
//! | `oauth.callback_url` | `oob` |
//! | `api.base_url` | `https://api.bitbucket.org/2.0/` |
//! | `api.timeout_secs` | `30` |
//! | `defaults.namespace` | unset |
//! | `defaults.repository` | unset |

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_API_BASE;

/// Callback used when the consumer has no callback URL: Bitbucket shows the
/// verifier to the user instead of redirecting.
pub const OUT_OF_BAND_CALLBACK: &str = "oob";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Every settable key, in display order.
pub const KEYS: [&str; 7] = [
    "oauth.consumer_key",
    "oauth.consumer_secret",
    "oauth.callback_url",
    "api.base_url",
    "api.timeout_secs",
    "defaults.namespace",
    "defaults.repository",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub oauth: OAuthConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// The registered OAuth consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthConfig {
    #[serde(default)]
    pub consumer_key: Option<String>,

    #[serde(default)]
    pub consumer_secret: Option<String>,

    #[serde(default = "default_callback_url")]
    pub callback_url: String,
}

fn default_callback_url() -> String {
    OUT_OF_BAND_CALLBACK.to_string()
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            consumer_key: None,
            consumer_secret: None,
            callback_url: default_callback_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout; `0` disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub repository: Option<String>,
}

impl Config {
    /// Loads the configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Reads a setting by dotted key. Unset and unknown keys yield `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "oauth.consumer_key" => self.oauth.consumer_key.clone(),
            "oauth.consumer_secret" => self.oauth.consumer_secret.clone(),
            "oauth.callback_url" => Some(self.oauth.callback_url.clone()),
            "api.base_url" => Some(self.api.base_url.clone()),
            "api.timeout_secs" => Some(self.api.timeout_secs.to_string()),
            "defaults.namespace" => self.defaults.namespace.clone(),
            "defaults.repository" => self.defaults.repository.clone(),
            _ => None,
        }
    }

    /// Updates a setting by dotted key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.to_string();
        match key {
            "oauth.consumer_key" => self.oauth.consumer_key = Some(value),
            "oauth.consumer_secret" => self.oauth.consumer_secret = Some(value),
            "oauth.callback_url" => self.oauth.callback_url = value,
            "api.base_url" => {
                url::Url::parse(&value).with_context(|| format!("Invalid URL: {value}"))?;
                self.api.base_url = value;
            }
            "api.timeout_secs" => {
                self.api.timeout_secs = value
                    .parse()
                    .with_context(|| format!("Expected a number of seconds, got '{value}'"))?;
            }
            "defaults.namespace" => self.defaults.namespace = Some(value),
            "defaults.repository" => self.defaults.repository = Some(value),
            _ => bail!("Unknown configuration key '{key}'. Valid keys: {}", KEYS.join(", ")),
        }
        Ok(())
    }
}
