//
//  bitbucket-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # CLI Module
//!
//! Command-line interface for `bbc`, defined with the clap derive API.
//!
//! ## Command Structure
//!
//! ```text
//! bbc <command> <subcommand> [flags]
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `auth` | OAuth login, logout and status |
//! | `user` | Show the authorized user or another account |
//! | `repo` | List, view and delete repositories |
//! | `restriction` | Manage branch restrictions |
//! | `variable` | Manage pipeline variables |
//! | `fork` | List and create forks |
//! | `webhook` | Manage webhooks |
//! | `pipeline` | Trigger pipelines |
//! | `config` | Read and write configuration |
//! | `completion` | Generate shell completions |
//!
//! ## Global Options
//!
//! - `--namespace, -n`: User or team that owns the repository
//! - `--repo, -R`: Repository slug
//! - `--consumer-key` / `--consumer-secret`: OAuth consumer (override config)
//! - `--compact`: Print JSON on one line
//!
//! Every flag can also be set through the environment (`BBC_NAMESPACE`,
//! `BBC_REPO`, `BBC_CONSUMER_KEY`, `BBC_CONSUMER_SECRET`).

mod auth;
mod completion;
mod config;
mod context;
mod fork;
mod pipeline;
mod repo;
mod restriction;
mod user;
mod variable;
mod webhook;

pub use auth::AuthCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use context::CommandContext;
pub use fork::ForkCommand;
pub use pipeline::PipelineCommand;
pub use repo::RepoCommand;
pub use restriction::RestrictionCommand;
pub use user::UserCommand;
pub use variable::VariableCommand;
pub use webhook::WebhookCommand;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "bbc",
    version,
    about = "Work with the Bitbucket REST API from the command line",
    long_about = "bbc authorizes against Bitbucket with OAuth 1.0a and manages repositories,\n\
                  branch restrictions, pipeline variables, forks and webhooks.",
    propagate_version = true,
    after_help = "Use 'bbc <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options accepted by every command.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// User or team that owns the repository
    #[arg(long, short = 'n', global = true, env = "BBC_NAMESPACE")]
    pub namespace: Option<String>,

    /// Repository slug
    #[arg(long, short = 'R', global = true, env = "BBC_REPO")]
    pub repo: Option<String>,

    /// OAuth consumer key
    #[arg(long, global = true, env = "BBC_CONSUMER_KEY", hide_env_values = true)]
    pub consumer_key: Option<String>,

    /// OAuth consumer secret
    #[arg(long, global = true, env = "BBC_CONSUMER_SECRET", hide_env_values = true)]
    pub consumer_secret: Option<String>,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    pub compact: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authorize bbc with Bitbucket
    Auth(AuthCommand),

    /// Show account information
    User(UserCommand),

    /// Work with repositories
    #[command(visible_alias = "r")]
    Repo(RepoCommand),

    /// Manage branch restrictions
    Restriction(RestrictionCommand),

    /// Manage pipeline variables
    #[command(visible_alias = "var")]
    Variable(VariableCommand),

    /// Work with forks
    Fork(ForkCommand),

    /// Manage webhooks
    Webhook(WebhookCommand),

    /// Run pipelines
    Pipeline(PipelineCommand),

    /// Read and write configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Show the version
    Version,
}
