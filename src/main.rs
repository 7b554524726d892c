//
//  bitbucket-client
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bitbucket_client::api::ApiError;
use bitbucket_client::cli::{Cli, Commands};
use bitbucket_client::exit_codes;
use bitbucket_client::output::OutputWriter;

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    let compact = cli.global.compact;

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            OutputWriter::new(compact).write_error(&format!("{e:#}"));
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging from `BBC_DEBUG` (an `EnvFilter` directive, default `warn`)
fn init_logging() {
    let filter = EnvFilter::try_from_env("BBC_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<ApiError>() {
        Some(ApiError::Status { status: 401 | 403, .. }) | Some(ApiError::Rejected(_)) => {
            exit_codes::AUTH_ERROR
        }
        Some(ApiError::Status { status: 404, .. }) => exit_codes::NOT_FOUND,
        Some(ApiError::Timeout) | Some(ApiError::Transport(_)) => exit_codes::UNAVAILABLE,
        Some(ApiError::InvalidInput(_)) => exit_codes::USAGE,
        _ => exit_codes::ERROR,
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::User(cmd) => cmd.run(&cli.global).await,
        Commands::Repo(cmd) => cmd.run(&cli.global).await,
        Commands::Restriction(cmd) => cmd.run(&cli.global).await,
        Commands::Variable(cmd) => cmd.run(&cli.global).await,
        Commands::Fork(cmd) => cmd.run(&cli.global).await,
        Commands::Webhook(cmd) => cmd.run(&cli.global).await,
        Commands::Pipeline(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("bbc version {}", bitbucket_client::VERSION);
            Ok(())
        }
    }
}
