//
//  mandrill-cli
//  cli/call.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Calls any Mandrill operation by path. Parameters come from repeated
//! `-F key=value` flags or from a JSON object read from a file or stdin.
//!
//! ## Examples
//!
//! ```bash
//! # List templates
//! mandrill call templates/list
//!
//! # Look up a message, typed and nested fields
//! mandrill call messages/search -F query="email:a@example.com" -F limit=10
//! mandrill call webhooks/add -F url=https://example.com/hook -F 'events=["send","open"]'
//!
//! # Send a message from a JSON document
//! mandrill call messages/send --input message.json
//! ```

use std::fs;
use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::Value;

use crate::api::Params;
use crate::output::{write_json, write_json_compact};

use super::GlobalOptions;

/// Call an API operation
#[derive(Args, Debug)]
pub struct CallCommand {
    /// Operation path (e.g., messages/send, users/info)
    pub operation: String,

    /// Request fields (key=value, values parsed as JSON where possible, nested with dots)
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Raw field values (not JSON-encoded, strings only)
    #[arg(long, action = clap::ArgAction::Append)]
    pub raw_field: Vec<String>,

    /// Read request parameters as a JSON object from file (- for stdin)
    #[arg(long, short = 'f', conflicts_with_all = ["field", "raw_field"])]
    pub input: Option<String>,

    /// Print the response on a single line
    #[arg(long)]
    pub compact: bool,
}

impl CallCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let operation = normalize_operation(&self.operation)?;
        let params = self.build_params()?;
        let client = global.client()?;

        let response = client.call(&operation, params).await?;

        if self.compact {
            write_json_compact(&response)
        } else {
            write_json(&response)
        }
    }

    fn build_params(&self) -> Result<Params> {
        if let Some(input) = &self.input {
            let content = if input == "-" {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else {
                fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))?
            };
            return parse_params_document(&content);
        }

        let mut params = Params::new();
        for field in &self.field {
            let (key, value) = parse_field(field)?;
            set_nested_value(&mut params, &key, value);
        }
        for field in &self.raw_field {
            let (key, value) = split_field(field)?;
            set_nested_value(&mut params, key, Value::String(value.to_string()));
        }
        Ok(params)
    }
}

/// Strips surrounding slashes and a trailing `.json` from an operation path.
fn normalize_operation(operation: &str) -> Result<String> {
    let trimmed = operation.trim().trim_matches('/');
    let trimmed = trimmed.strip_suffix(".json").unwrap_or(trimmed);
    if trimmed.is_empty() {
        bail!("Operation path must not be empty");
    }
    Ok(trimmed.to_string())
}

fn parse_params_document(content: &str) -> Result<Params> {
    match serde_json::from_str::<Value>(content).context("Input is not valid JSON")? {
        Value::Object(map) => Ok(map),
        _ => bail!("Input must be a JSON object"),
    }
}

fn split_field(field: &str) -> Result<(&str, &str)> {
    match field.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => bail!("Invalid field format: {}. Expected key=value", field),
    }
}

fn parse_field(field: &str) -> Result<(String, Value)> {
    let (key, value_str) = split_field(field)?;

    let value = if value_str == "true" {
        Value::Bool(true)
    } else if value_str == "false" {
        Value::Bool(false)
    } else if value_str == "null" {
        Value::Null
    } else if let Ok(n) = value_str.parse::<i64>() {
        Value::Number(n.into())
    } else if let Some(n) = value_str
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
    {
        Value::Number(n)
    } else if value_str.starts_with('[') || value_str.starts_with('{') {
        serde_json::from_str(value_str).unwrap_or_else(|_| Value::String(value_str.to_string()))
    } else {
        Value::String(value_str.to_string())
    };

    Ok((key.to_string(), value))
}

fn set_nested_value(obj: &mut Params, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let entry = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Params::new()));
            if !entry.is_object() {
                *entry = Value::Object(Params::new());
            }
            if let Value::Object(nested) = entry {
                set_nested_value(nested, rest, value);
            }
        }
    }
}
