//
//  mandrill-cli
//  auth/env.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Credential Environment
//!
//! The credential resolver never touches process state directly. It asks a
//! [`CredentialEnv`] for environment variables, the home directory, and key
//! files. Tests substitute an in-memory fake.

use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::config::{config_exists, read_config_file};

/// Read-only view of the process environment and filesystem.
pub trait CredentialEnv {
    /// Returns the value of an environment variable, if set and valid UTF-8.
    fn var(&self, name: &str) -> Option<String>;

    /// Returns the current user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Returns `true` if a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Reads the full contents of the file at `path`.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// [`CredentialEnv`] backed by the real process environment and filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnv;

impl CredentialEnv for SystemEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }

    fn exists(&self, path: &Path) -> bool {
        config_exists(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        read_config_file(path)
    }
}
