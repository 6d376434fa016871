//
//  mandrill-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Mandrill CLI Library
//!
//! A client library and command-line interface for the Mandrill transactional
//! email API.
//!
//! ## Overview
//!
//! Every Mandrill operation is a JSON `POST` to
//! `{host}{path}{operation}.json`. The body is the caller's parameter object
//! with the API key injected under `"key"`. A `200` response carries the
//! result. Any other status carries an error envelope that is classified into
//! a typed [`api::MandrillError`].
//!
//! ## Module Structure
//!
//! - [`api`]: Request dispatcher, transport and error taxonomy
//! - [`auth`]: API key resolution
//! - [`config`]: Configuration file management
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Output formatting
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mandrill_cli::MandrillClient;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), mandrill_cli::api::MandrillError> {
//! let client = MandrillClient::new(None)?;
//! let info = client
//!     .call_with("users/info", &json!({}))
//!     .await?;
//! println!("{info}");
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
pub mod cli;

/// Mandrill request dispatcher.
///
/// Builds endpoint URLs, injects the API key, sends exactly one request per
/// call and classifies failures into [`api::MandrillError`].
pub mod api;

/// API key resolution.
///
/// Looks for a key on the command line, then in `MANDRILL_APIKEY`, then in
/// `~/.mandrill.key` and `/etc/mandrill.key`.
pub mod auth;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/mandrill/config.toml`
/// - macOS: `~/Library/Application Support/mandrill/config.toml`
/// - Windows: `%APPDATA%\mandrill\config.toml`
pub mod config;

/// Output formatting.
pub mod output;

/// Re-export of the main CLI struct for convenient access.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use mandrill_cli::Cli;
///
/// let cli = Cli::parse();
/// ```
pub use cli::Cli;

/// Re-export of the API client.
pub use api::MandrillClient;

/// Re-export of the configuration struct.
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for the user agent and configuration paths.
pub const APP_NAME: &str = "mandrill";

/// Application version constant.
///
/// ```rust
/// use mandrill_cli::VERSION;
///
/// println!("mandrill version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Scripts can tell a missing key apart from a rejected request or an
/// unreachable server.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues (clap exits with `2`)
/// - `4-7`: Credential and configuration issues
/// - `8-31`: Errors reported by the API
/// - `32+`: Network and protocol issues
pub mod exit_codes {
    use crate::api::MandrillError;

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// No API key could be found, or the configuration is invalid.
    ///
    /// Set `MANDRILL_APIKEY`, pass `--api-key`, or create `~/.mandrill.key`.
    pub const CONFIG_ERROR: i32 = 4;

    /// The API returned an error envelope.
    pub const API_ERROR: i32 = 8;

    /// The server could not be reached or replied with an unexpected body.
    pub const NETWORK_ERROR: i32 = 32;

    /// Maps an error to the exit code the CLI terminates with.
    pub fn for_error(err: &anyhow::Error) -> i32 {
        match err.downcast_ref::<MandrillError>() {
            Some(MandrillError::Configuration(_)) => CONFIG_ERROR,
            Some(MandrillError::Api { .. }) => API_ERROR,
            Some(MandrillError::Transport(_)) | Some(MandrillError::Protocol { .. }) => {
                NETWORK_ERROR
            }
            Some(MandrillError::Serialization(_)) | None => ERROR,
        }
    }

}
