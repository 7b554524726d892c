//
//  bitbucket-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Client Library
//!
//! An OAuth 1.0a-signed client for the Bitbucket Cloud REST API v2.0, plus the
//! `bbc` command-line tool built on it.
//!
//! ## Features
//!
//! - **OAuth 1.0a**: HMAC-SHA1 request signing and the three-legged handshake
//! - **Pagination**: list endpoints are followed through every `next` page
//! - **Resource clients**: repositories, branches, tags, deploy keys, links,
//!   forks, webhooks, pipelines, pipeline variables and branch restrictions
//! - **Uniform results**: every call yields a payload or an [`api::ApiError`]
//!   whose message matches the failure (`Not Found`, `Timeout when contacting
//!   BitBucket`, ...)
//!
//! ## Module Structure
//!
//! - [`api`]: URL builders, dispatcher, session and resource clients
//! - [`auth`]: OAuth signing, the handshake and keyring token storage
//! - [`cli`]: Command-line interface definitions using clap
//! - [`config`]: Configuration file management
//! - [`interactive`]: Terminal prompts
//! - [`output`]: JSON and status-line output
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bitbucket_client::BitBucket;
//! use bitbucket_client::api::ResultTupleExt;
//!
//! # async fn example() -> Result<(), bitbucket_client::api::ApiError> {
//! let bitbucket = BitBucket::new("consumer-key", "consumer-secret", "oob")?;
//!
//! let auth = bitbucket.authorization_url().await?;
//! println!("Visit {}", auth.url);
//!
//! let access = bitbucket.verify_token(&auth.request_token, "verifier").await?;
//! let client = bitbucket.authorized_client(access);
//!
//! let (success, repos, error) = client
//!     .for_namespace("myteam")
//!     .repositories()
//!     .all()
//!     .await
//!     .into_tuple();
//! # Ok(())
//! # }
//! ```

/// Bitbucket REST API client.
///
/// Endpoint URLs, the signing dispatcher with pagination and error
/// translation, and one client per resource family.
pub mod api;

/// OAuth 1.0a signing, the authorization handshake and token storage.
pub mod auth;

/// Command-line interface definitions.
pub mod cli;

/// Configuration file management.
///
/// - Linux: `~/.config/bbc/config.toml`
/// - macOS: `~/Library/Application Support/bbc/config.toml`
/// - Windows: `%APPDATA%\bbc\config.toml`
pub mod config;

/// Interactive terminal prompts.
pub mod interactive;

/// Output formatting.
pub mod output;

pub use api::BitBucket;
pub use cli::Cli;
pub use config::Config;

/// The name of the CLI binary, also used for configuration paths.
pub const APP_NAME: &str = "bbc";

/// The crate version, from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// The command completed without errors.
    pub const SUCCESS: i32 = 0;

    /// An unspecified error occurred; details are on stderr.
    pub const ERROR: i32 = 1;

    /// Invalid arguments or local input.
    pub const USAGE: i32 = 2;

    /// Missing or rejected credentials (HTTP 401/403, handshake rejection).
    pub const AUTH_ERROR: i32 = 4;

    /// The resource does not exist (HTTP 404).
    pub const NOT_FOUND: i32 = 8;

    /// Bitbucket could not be reached or timed out.
    pub const UNAVAILABLE: i32 = 32;
}
