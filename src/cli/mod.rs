//
//  mandrill-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod auth;
mod call;
mod completion;
mod config;
mod ping;

pub use auth::AuthCommand;
pub use call::CallCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use ping::PingCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::MandrillClient;
use crate::auth::SystemEnv;
use crate::config::Config;

/// Mandrill CLI - Call the Mandrill API from the command line
#[derive(Parser, Debug)]
#[command(
    name = "mandrill",
    version,
    about = "Call the Mandrill API from the command line",
    long_about = "mandrill is a CLI for the Mandrill transactional email API.\n\n\
                  The API key is taken from --api-key, then MANDRILL_APIKEY,\n\
                  then ~/.mandrill.key, then /etc/mandrill.key.",
    propagate_version = true,
    after_help = "Use 'mandrill <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Mandrill API key (overrides MANDRILL_APIKEY and key files)
    #[arg(long, short = 'k', global = true)]
    pub api_key: Option<String>,

    /// API host (e.g., https://mandrillapp.com)
    #[arg(long, global = true, env = "MANDRILL_HOST")]
    pub host: Option<String>,

    /// Log requests and response bodies
    #[arg(long, global = true)]
    pub debug: bool,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Loads the configuration file and applies command-line overrides.
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::load()?;
        if let Some(host) = &self.host {
            config.set("host", host)?;
        }
        if self.debug {
            config.api.debug = true;
        }
        Ok(config)
    }

    /// Builds a client from the effective configuration.
    pub fn client(&self) -> Result<MandrillClient> {
        let config = self.config()?;
        Ok(MandrillClient::from_config(
            &config.api,
            self.api_key.as_deref(),
            &SystemEnv,
        )?)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Call an API operation
    #[command(visible_alias = "api")]
    Call(CallCommand),

    /// Check that the API key works
    Ping(PingCommand),

    /// Inspect API key resolution
    Auth(AuthCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}
