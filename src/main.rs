//
//  mandrill-cli
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mandrill_cli::cli::{Cli, Commands};
use mandrill_cli::config::Config;
use mandrill_cli::exit_codes;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; the config file can enable debug output too
    let debug = cli.global.debug || Config::load().map(|c| c.api.debug).unwrap_or(false);
    init_logging(debug);

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::for_error(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_env("MANDRILL_LOG").unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("warn,mandrill_cli=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Call(cmd) => cmd.run(&cli.global).await,
        Commands::Ping(cmd) => cmd.run(&cli.global).await,
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("mandrill version {}", mandrill_cli::VERSION);
            Ok(())
        }
    }
}
