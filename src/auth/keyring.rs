//
//  bitbucket-client
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Access Token Storage
//!
//! Persists OAuth access token pairs in the platform keyring:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! Entries are keyed by the consumer key, so tokens issued to different OAuth
//! consumers never collide. The stored secret is the JSON form of a [`TokenPair`].

use anyhow::{Context, Result};
use keyring::Entry;

use super::TokenPair;

const SERVICE_NAME: &str = "bitbucket-client";

/// Keyring-backed store for access token pairs.
pub struct TokenStore {
    service: String,
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Saves `token` for `consumer_key`, replacing any previous entry.
    pub fn store(&self, consumer_key: &str, token: &TokenPair) -> Result<()> {
        let entry = Entry::new(&self.service, consumer_key)?;
        let serialized = serde_json::to_string(token)?;
        entry
            .set_password(&serialized)
            .context("Failed to save access token to the system keyring")?;
        Ok(())
    }

    /// Loads the token pair for `consumer_key`, if one was stored.
    pub fn get(&self, consumer_key: &str) -> Result<Option<TokenPair>> {
        let entry = Entry::new(&self.service, consumer_key)?;
        match entry.get_password() {
            Ok(serialized) => Ok(Some(
                serde_json::from_str(&serialized).context("Stored access token is corrupt")?,
            )),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes the entry for `consumer_key`; missing entries are not an error.
    pub fn delete(&self, consumer_key: &str) -> Result<()> {
        let entry = Entry::new(&self.service, consumer_key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
