//
//  bitbucket-client
//  cli/variable.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Pipeline Variable Commands
//!
//! ```bash
//! bbc variable list -R team/app
//! bbc variable create DEPLOY_TOKEN --secured      # value is prompted for
//! bbc variable create REGION eu-west-1
//! bbc variable update '{uuid}' --value eu-central-1
//! bbc variable delete '{uuid}' --yes
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::cloud::VariableUpdate;
use crate::interactive::{confirm_or_skip, prompt_password};

use super::{CommandContext, GlobalOptions};

#[derive(Args, Debug)]
pub struct VariableCommand {
    #[command(subcommand)]
    pub command: VariableSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum VariableSubcommand {
    /// List repository variables
    #[command(visible_alias = "ls")]
    List,

    /// Show one variable
    View { uuid: String },

    /// Create a variable
    Create(CreateArgs),

    /// Update a variable; only the given fields change
    Update(UpdateArgs),

    /// Delete a variable
    Delete {
        uuid: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    pub key: String,

    /// Value (prompted for when omitted)
    pub value: Option<String>,

    /// Hide the value in logs and API responses
    #[arg(long)]
    pub secured: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub uuid: String,

    #[arg(long)]
    pub key: Option<String>,

    #[arg(long)]
    pub value: Option<String>,

    #[arg(long)]
    pub secured: Option<bool>,
}

impl VariableCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = CommandContext::load(global)?;
        let variables = ctx.repository()?.pipelines_config().variables();

        match &self.command {
            VariableSubcommand::List => ctx.output.write_json(&variables.all().await?),
            VariableSubcommand::View { uuid } => ctx.output.write_json(&variables.get(uuid).await?),
            VariableSubcommand::Create(args) => {
                let value = match &args.value {
                    Some(value) => value.clone(),
                    None => prompt_password(&format!("Value for {}", args.key))?,
                };
                let created = variables.create(&args.key, &value, args.secured).await?;
                ctx.output.write_json(&created)
            }
            VariableSubcommand::Update(args) => {
                let update = VariableUpdate {
                    key: args.key.clone(),
                    value: args.value.clone(),
                    secured: args.secured,
                };
                ctx.output.write_json(&variables.update(&args.uuid, &update).await?)
            }
            VariableSubcommand::Delete { uuid, yes } => {
                if !confirm_or_skip(&format!("Delete variable {uuid}?"), *yes)? {
                    ctx.output.write_warning("Cancelled");
                    return Ok(());
                }
                variables.delete(uuid).await?;
                ctx.output.write_success(&format!("Deleted variable {uuid}"));
                Ok(())
            }
        }
    }
}
