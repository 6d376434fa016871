//
//  mandrill-cli
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands for the Mandrill CLI.
//!
//! Mandrill has no login flow; these commands explain which API key the CLI
//! would use and where it came from.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::auth::{key_file_candidates, mask_key, resolve_api_key, SystemEnv, API_KEY_ENV};
use crate::output::{color_enabled, print_field, print_header};

use super::GlobalOptions;

/// Inspect API key resolution.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Show which API key would be used
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show the API key (masked)
    #[arg(long, short = 't')]
    pub show_key: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Status(args) => status(args, global),
        }
    }
}

fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let resolved = resolve_api_key(global.api_key.as_deref(), &SystemEnv)?;

    if global.json {
        let mut result = serde_json::json!({
            "source": resolved.source.to_string(),
        });
        if args.show_key {
            result["key"] = serde_json::Value::String(mask_key(&resolved.key));
        }
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let color = color_enabled();
    print_header("API key");
    print_field("Source", &resolved.source.to_string(), color);
    if args.show_key {
        print_field("Key", &mask_key(&resolved.key), color);
    }

    let files: Vec<String> = key_file_candidates(&SystemEnv)
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    println!();
    println!("Lookup order: --api-key, {}, {}", API_KEY_ENV, files.join(", "));

    Ok(())
}
