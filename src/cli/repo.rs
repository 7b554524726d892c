//
//  bitbucket-client
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Repository Commands
//!
//! ```bash
//! # Repositories you are a member of
//! bbc repo list
//!
//! # Slugs of a team's repositories
//! bbc repo list --namespace myteam --names
//!
//! # Metadata, main branch and a file
//! bbc repo view -R myteam/app
//! bbc repo view -R myteam/app --main-branch
//! bbc repo view -R myteam/app --file README.md --rev main
//!
//! bbc repo delete -R myteam/old-app --yes
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::interactive::confirm_or_skip;

use super::{CommandContext, GlobalOptions};

#[derive(Args, Debug)]
pub struct RepoCommand {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// List repositories
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show repository metadata or contents
    View(ViewArgs),

    /// Delete a repository
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print slugs only
    #[arg(long)]
    pub names: bool,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Show the main branch instead of the metadata
    #[arg(long, conflicts_with = "file")]
    pub main_branch: bool,

    /// Print the raw contents of a file
    #[arg(long)]
    pub file: Option<String>,

    /// Revision used with --file
    #[arg(long, default_value = "HEAD")]
    pub rev: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl RepoCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = CommandContext::load(global)?;
        match &self.command {
            RepoSubcommand::List(args) => list(&ctx, args).await,
            RepoSubcommand::View(args) => view(&ctx, args).await,
            RepoSubcommand::Delete(args) => delete(&ctx, args).await,
        }
    }
}

async fn list(ctx: &CommandContext, args: &ListArgs) -> Result<()> {
    let client = ctx.client()?;
    let namespace = ctx.namespace().ok();

    match (namespace, args.names) {
        (Some(namespace), true) => {
            for name in client.for_namespace(&namespace).repositories().names().await? {
                ctx.output.write_info(&name);
            }
            Ok(())
        }
        (Some(namespace), false) => {
            let repos = client.for_namespace(&namespace).repositories().all().await?;
            ctx.output.write_json(&repos)
        }
        (None, names) => {
            let repos = client.visible_repositories().await?;
            if !names {
                return ctx.output.write_json(&repos);
            }
            let values = repos.get("values").and_then(|v| v.as_array());
            for repo in values.into_iter().flatten() {
                if let Some(name) = repo.get("full_name").and_then(|n| n.as_str()) {
                    ctx.output.write_info(name);
                }
            }
            Ok(())
        }
    }
}

async fn view(ctx: &CommandContext, args: &ViewArgs) -> Result<()> {
    let repo = ctx.repository()?;
    if let Some(path) = &args.file {
        let contents = repo.raw_path_contents(&args.rev, path).await?;
        print!("{contents}");
        return Ok(());
    }

    let payload = if args.main_branch {
        repo.main_branch().await?
    } else {
        repo.info().await?
    };
    ctx.output.write_json(&payload)
}

async fn delete(ctx: &CommandContext, args: &DeleteArgs) -> Result<()> {
    let (namespace, slug) = ctx.resolve()?;
    if !confirm_or_skip(&format!("Delete {namespace}/{slug}? This cannot be undone."), args.yes)? {
        ctx.output.write_warning("Cancelled");
        return Ok(());
    }
    ctx.client()?
        .for_namespace(&namespace)
        .repositories()
        .delete(&slug)
        .await?;
    ctx.output.write_success(&format!("Deleted {namespace}/{slug}"));
    Ok(())
}
