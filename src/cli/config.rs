//
//  mandrill-cli
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Get, set, reset and list the endpoint settings stored in the
//! configuration file.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::{ApiConfig, Config, CONFIG_KEYS};

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Reset a configuration value to its default
    Unset(UnsetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key (host, path, debug)
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key (host, path, debug)
    pub key: String,

    /// Configuration value
    pub value: String,
}

#[derive(Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key (host, path, debug)
    pub key: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Unset(args) => self.unset(args, global),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    /// Get a configuration value
    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let Some(value) = config.get(&args.key) else {
            bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                args.key,
                CONFIG_KEYS.join(", ")
            );
        };

        if global.json {
            let result = serde_json::json!({
                "key": args.key,
                "value": value,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", value);
        }

        Ok(())
    }

    /// Set a configuration value
    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let mut config = Config::load()?;
        config.set(&args.key, &args.value)?;
        config.save()?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
                "value": config.get(&args.key),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Set {} = {}",
                style("✓").green(),
                style(&args.key).cyan(),
                args.value
            );
        }

        Ok(())
    }

    /// Reset a configuration value to its default
    fn unset(&self, args: &UnsetArgs, global: &GlobalOptions) -> Result<()> {
        let mut config = Config::load()?;
        let defaults = ApiConfig::default();
        match args.key.as_str() {
            "host" => config.api.host = defaults.host,
            "path" => config.api.path = defaults.path,
            "debug" => config.api.debug = defaults.debug,
            _ => bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                args.key,
                CONFIG_KEYS.join(", ")
            ),
        }
        config.save()?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{} Unset {}", style("✓").green(), style(&args.key).cyan());
        }

        Ok(())
    }

    /// List all configuration values
    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;

        if global.json {
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }

        println!();
        println!("{}", style("API Configuration").bold());
        println!("{}", "-".repeat(50));
        for key in CONFIG_KEYS {
            if let Some(value) = config.get(key) {
                println!("  {}: {}", style(key).cyan(), value);
            }
        }
        println!();

        Ok(())
    }

    /// Show configuration file path
    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let config_path = Config::config_path()?;

        if global.json {
            let result = serde_json::json!({
                "path": config_path.display().to_string(),
                "exists": config_path.exists(),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", config_path.display());
        }

        Ok(())
    }
}
