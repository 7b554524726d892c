//
//  bitbucket-client
//  cli/webhook.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Webhook Commands
//!
//! ```bash
//! bbc webhook list -R team/app
//! bbc webhook create -R team/app --url https://ci.example.com/hook -e repo:push,pullrequest:created
//! bbc webhook view '{uuid}'
//! bbc webhook delete '{uuid}' --yes
//! ```

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::api::cloud::WebhookSettings;
use crate::interactive::confirm_or_skip;

use super::{CommandContext, GlobalOptions};

#[derive(Args, Debug)]
pub struct WebhookCommand {
    #[command(subcommand)]
    pub command: WebhookSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum WebhookSubcommand {
    /// List webhooks
    #[command(visible_alias = "ls")]
    List,

    /// Show one webhook
    View(ViewArgs),

    /// Create a webhook
    Create(CreateArgs),

    /// Delete a webhook
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    pub uuid: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// URL Bitbucket will POST to
    #[arg(long, short = 'u')]
    pub url: String,

    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    /// Events to subscribe to, comma-separated
    #[arg(long, short = 'e', value_delimiter = ',')]
    pub events: Vec<String>,

    /// Create the hook disabled
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub uuid: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl WebhookCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = CommandContext::load(global)?;
        let webhooks = ctx.repository()?.webhooks();

        match &self.command {
            WebhookSubcommand::List => ctx.output.write_json(&webhooks.all().await?),
            WebhookSubcommand::View(args) => ctx.output.write_json(&webhooks.get(&args.uuid).await?),
            WebhookSubcommand::Create(args) => {
                if args.events.is_empty() {
                    bail!("At least one event is required, e.g. --events repo:push");
                }
                let mut settings =
                    WebhookSettings::new(args.description.as_str(), args.url.as_str(), args.events.clone());
                settings.active = !args.inactive;
                ctx.output.write_json(&webhooks.create(&settings).await?)
            }
            WebhookSubcommand::Delete(args) => {
                if !confirm_or_skip(&format!("Delete webhook {}?", args.uuid), args.yes)? {
                    ctx.output.write_warning("Cancelled");
                    return Ok(());
                }
                webhooks.delete(&args.uuid).await?;
                ctx.output.write_success(&format!("Deleted webhook {}", args.uuid));
                Ok(())
            }
        }
    }
}
