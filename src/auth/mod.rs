//
//  mandrill-cli
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Mandrill authenticates every request with a single API key carried in the
//! JSON body. This module decides which key to use.
//!
//! ## Module Structure
//!
//! - `resolver`: Layered key resolution (explicit, environment, key files)
//! - `env`: The [`CredentialEnv`] abstraction over process state
//!
//! ## Example
//!
//! ```rust,no_run
//! use mandrill_cli::auth::{resolve_api_key, SystemEnv};
//!
//! let resolved = resolve_api_key(Some("my-api-key"), &SystemEnv)?;
//! assert_eq!(resolved.key, "my-api-key");
//! # Ok::<(), mandrill_cli::api::MandrillError>(())
//! ```

mod env;
mod resolver;

pub use env::*;
pub use resolver::*;
