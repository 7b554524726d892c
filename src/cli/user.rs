//
//  bitbucket-client
//  cli/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Args;

use super::{CommandContext, GlobalOptions};

#[derive(Args, Debug)]
pub struct UserCommand {
    /// Account to look up (defaults to the authorized user)
    pub account: Option<String>,
}

impl UserCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = CommandContext::load(global)?;
        let client = ctx.client()?;
        let user = match &self.account {
            Some(account) => client.accounts().profile(account).await?,
            None => client.current_user().await?,
        };
        ctx.output.write_json(&user)
    }
}
