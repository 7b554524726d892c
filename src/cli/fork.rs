//
//  bitbucket-client
//  cli/fork.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::cloud::ForkSettings;

use super::{CommandContext, GlobalOptions};

#[derive(Args, Debug)]
pub struct ForkCommand {
    #[command(subcommand)]
    pub command: ForkSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ForkSubcommand {
    /// List forks of the repository
    #[command(visible_alias = "ls")]
    List,

    /// Fork the repository
    Create(CreateArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Namespace that will own the fork
    #[arg(long)]
    pub owner: Option<String>,

    /// Name of the fork
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// allow_forks, no_public_forks or no_forks
    #[arg(long)]
    pub fork_policy: Option<String>,

    #[arg(long)]
    pub language: Option<String>,

    #[arg(long)]
    pub mainbranch: Option<String>,

    #[arg(long)]
    pub private: Option<bool>,

    #[arg(long)]
    pub has_issues: Option<bool>,

    #[arg(long)]
    pub has_wiki: Option<bool>,
}

impl CreateArgs {
    fn settings(&self) -> ForkSettings {
        ForkSettings {
            owner: self.owner.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            fork_policy: self.fork_policy.clone(),
            language: self.language.clone(),
            mainbranch: self.mainbranch.clone(),
            is_private: self.private,
            has_issues: self.has_issues,
            has_wiki: self.has_wiki,
            project: None,
        }
    }
}

impl ForkCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = CommandContext::load(global)?;
        let forks = ctx.repository()?.forks();

        let payload = match &self.command {
            ForkSubcommand::List => forks.all().await?,
            ForkSubcommand::Create(args) => forks.create(&args.settings()).await?,
        };
        ctx.output.write_json(&payload)
    }
}
