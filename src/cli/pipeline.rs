//
//  bitbucket-client
//  cli/pipeline.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use super::{CommandContext, GlobalOptions};

#[derive(Args, Debug)]
pub struct PipelineCommand {
    #[command(subcommand)]
    pub command: PipelineSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PipelineSubcommand {
    /// Run the pipeline for the head of a branch or tag
    #[command(visible_alias = "run")]
    Trigger(TriggerArgs),

    /// Enable pipelines for the repository
    Enable,

    /// Disable pipelines for the repository
    Disable,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RefType {
    Branch,
    Tag,
}

impl RefType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Branch => "branch",
            Self::Tag => "tag",
        }
    }
}

#[derive(Args, Debug)]
pub struct TriggerArgs {
    /// Branch or tag name
    pub ref_name: String,

    #[arg(long, value_enum, default_value = "branch")]
    pub ref_type: RefType,
}

impl PipelineCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = CommandContext::load(global)?;
        let repo = ctx.repository()?;

        let payload = match &self.command {
            PipelineSubcommand::Trigger(args) => {
                repo.pipelines()
                    .trigger_ref_target(args.ref_type.as_str(), &args.ref_name)
                    .await?
            }
            PipelineSubcommand::Enable => repo.pipelines_config().update(true).await?,
            PipelineSubcommand::Disable => repo.pipelines_config().update(false).await?,
        };
        ctx.output.write_json(&payload)
    }
}
