//
//  mandrill-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the client for the Mandrill JSON API at
//! `https://mandrillapp.com/api/1.0/`.
//!
//! ## Architecture
//!
//! - [`client`]: Request dispatch, key injection and response classification
//! - [`transport`]: The HTTP POST boundary and its `reqwest` implementation
//! - [`error`]: The error taxonomy and the server error name table
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mandrill_cli::api::{ApiErrorKind, MandrillClient, MandrillError, Params};
//!
//! # async fn example() -> Result<(), MandrillError> {
//! let client = MandrillClient::new(None)?;
//!
//! match client.call("templates/info", Params::new()).await {
//!     Ok(template) => println!("{template}"),
//!     Err(MandrillError::Api { kind: ApiErrorKind::UnknownTemplate, message }) => {
//!         eprintln!("No such template: {message}");
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every call yields either the parsed JSON body or exactly one
//! [`MandrillError`]. Nothing is retried.

/// Request dispatcher for the Mandrill API.
///
/// Provides the [`MandrillClient`] struct which handles:
/// - API key injection
/// - Request serialization
/// - Status and error envelope interpretation
pub mod client;

/// Error types for API operations.
pub mod error;

/// HTTP transport abstraction.
pub mod transport;

pub use client::{MandrillClient, Params, KEY_FIELD};
pub use error::{ApiErrorKind, ErrorEnvelope, MandrillError};
pub use transport::{ReqwestTransport, Transport, TransportResponse};
