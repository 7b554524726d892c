//
//  bitbucket-client
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Commands
//!
//! ```bash
//! bbc config set defaults.namespace myteam
//! bbc config get api.timeout_secs
//! bbc config list
//! bbc config path
//! ```
//!
//! `oauth.consumer_secret` is masked in `list` output.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, KEYS};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print a setting
    Get { key: String },

    /// Change a setting
    Set { key: String, value: String },

    /// Print every setting
    #[command(visible_alias = "ls")]
    List,

    /// Print the configuration file path
    Path,
}

impl ConfigCommand {
    pub async fn run(&self, _global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get { key } => {
                if !KEYS.contains(&key.as_str()) {
                    bail!("Unknown configuration key '{key}'. Valid keys: {}", KEYS.join(", "));
                }
                let config = Config::load()?;
                if let Some(value) = config.get(key) {
                    println!("{value}");
                }
                Ok(())
            }
            ConfigSubcommand::Set { key, value } => {
                let mut config = Config::load()?;
                config.set(key, value)?;
                config.save()?;
                println!("{} Set {} to {}", style("✓").green(), key, display_value(key, value));
                Ok(())
            }
            ConfigSubcommand::List => {
                let config = Config::load()?;
                for key in KEYS {
                    let value = config.get(key).unwrap_or_default();
                    println!("{}={}", style(key).dim(), display_value(key, &value));
                }
                Ok(())
            }
            ConfigSubcommand::Path => {
                println!("{}", Config::config_path()?.display());
                Ok(())
            }
        }
    }
}

fn display_value(key: &str, value: &str) -> String {
    if key == "oauth.consumer_secret" && !value.is_empty() {
        "********".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_is_masked() {
        assert_eq!(display_value("oauth.consumer_secret", "s3cr3t"), "********");
        assert_eq!(display_value("oauth.consumer_secret", ""), "");
        assert_eq!(display_value("oauth.consumer_key", "abc"), "abc");
    }
}
