//
//  mandrill-cli
//  cli/ping.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Connectivity check

use anyhow::Result;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::api::Params;
use crate::output::{color_enabled, write_json, write_success};

use super::GlobalOptions;

const PING_OPERATION: &str = "users/ping2";

/// Check that the API key works
#[derive(Args, Debug)]
pub struct PingCommand {}

#[derive(Debug, Deserialize, Serialize)]
struct Pong {
    #[serde(rename = "PING")]
    ping: String,
}

impl PingCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let pong: Pong = client.call_as(PING_OPERATION, Params::new()).await?;

        if global.json {
            write_json(&pong)?;
        } else {
            write_success(
                &format!("{} (key from {})", pong.ping, client.key_source()),
                color_enabled(),
            );
        }

        Ok(())
    }
}
