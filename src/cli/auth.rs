//
//  bitbucket-client
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `bbc auth login` | Run the OAuth 1.0a handshake and store the access token |
//! | `bbc auth logout` | Remove the stored access token |
//! | `bbc auth status` | Show whether a token is stored and who it belongs to |
//!
//! ## Login Flow
//!
//! 1. A request token is fetched and the authorize URL is opened in the browser
//! 2. The user approves access; Bitbucket shows (or redirects with) a verifier
//! 3. The verifier is exchanged for an access token pair
//! 4. The pair is stored in the system keyring under the consumer key
//!
//! When no consumer is configured, login prompts for one and saves it to the
//! configuration file.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::auth::TokenStore;
use crate::interactive::{prompt_confirm_with_default, prompt_input, prompt_password};

use super::{CommandContext, GlobalOptions};

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Authorize with Bitbucket
    Login(LoginArgs),

    /// Remove the stored access token
    Logout,

    /// Show authentication status
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Verifier from a previous authorization (skips the prompt)
    #[arg(long)]
    pub verifier: Option<String>,

    /// Print the authorize URL instead of opening a browser
    #[arg(long)]
    pub no_browser: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let mut ctx = CommandContext::load(global)?;
        match &self.command {
            AuthSubcommand::Login(args) => login(&mut ctx, args).await,
            AuthSubcommand::Logout => logout(&ctx),
            AuthSubcommand::Status => status(&ctx).await,
        }
    }
}

async fn login(ctx: &mut CommandContext, args: &LoginArgs) -> Result<()> {
    if ctx.consumer().is_err() {
        ctx.output
            .write_info("No OAuth consumer configured. Create one under Workspace settings > OAuth consumers.");
        let key = prompt_input("Consumer key")?;
        let secret = prompt_password("Consumer secret")?;
        ctx.config.set("oauth.consumer_key", &key)?;
        ctx.config.set("oauth.consumer_secret", &secret)?;
        ctx.config.save().context("Failed to save consumer to configuration")?;
    }

    let (consumer_key, _) = ctx.consumer()?;
    let store = TokenStore::new();
    if store.get(&consumer_key)?.is_some()
        && !prompt_confirm_with_default("Already logged in. Re-authenticate?", false)?
    {
        return Ok(());
    }

    let bitbucket = ctx.bitbucket()?;
    let authorization = bitbucket.authorization_url().await?;

    ctx.output.write_info(&format!("Authorize bbc at:\n\n  {}\n", authorization.url));
    if !args.no_browser {
        if let Err(e) = webbrowser::open(&authorization.url) {
            ctx.output.write_warning(&format!("Could not open browser: {e}"));
        }
    }

    let verifier = match &args.verifier {
        Some(verifier) => verifier.clone(),
        None => prompt_input("Verifier")?,
    };

    let access = bitbucket
        .verify_token(&authorization.request_token, &verifier)
        .await?;
    store.store(&consumer_key, &access)?;

    let user = bitbucket.authorized_client(access).current_user().await?;
    match user.get("display_name").and_then(|n| n.as_str()) {
        Some(name) => ctx.output.write_success(&format!("Logged in as {name}")),
        None => ctx.output.write_success("Logged in"),
    }
    Ok(())
}

fn logout(ctx: &CommandContext) -> Result<()> {
    let (consumer_key, _) = ctx.consumer()?;
    TokenStore::new().delete(&consumer_key)?;
    ctx.output.write_success("Logged out");
    Ok(())
}

async fn status(ctx: &CommandContext) -> Result<()> {
    let (consumer_key, _) = ctx.consumer()?;
    ctx.output.write_info(&format!("Consumer: {consumer_key}"));

    if TokenStore::new().get(&consumer_key)?.is_none() {
        ctx.output.write_warning("Not logged in. Run `bbc auth login` to authorize.");
        return Ok(());
    }

    match ctx.client()?.current_user().await {
        Ok(user) => {
            let name = user
                .get("display_name")
                .and_then(|n| n.as_str())
                .unwrap_or("unknown user");
            ctx.output.write_success(&format!("Logged in as {name}"));
        }
        Err(e) => ctx
            .output
            .write_warning(&format!("A token is stored but Bitbucket rejected it: {e}")),
    }
    Ok(())
}
