//
//  mandrill-cli
//  auth/resolver.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Key Resolution
//!
//! Determines which Mandrill API key to use. Sources are consulted in a fixed
//! order and the first non-empty one wins:
//!
//! 1. An explicit key passed by the caller
//! 2. The `MANDRILL_APIKEY` environment variable
//! 3. The per-user key file `~/.mandrill.key`
//! 4. The system-wide key file `/etc/mandrill.key`
//!
//! Key files hold the bare key; surrounding whitespace is ignored.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mandrill_cli::auth::{resolve_api_key, KeySource, SystemEnv};
//!
//! let resolved = resolve_api_key(None, &SystemEnv)?;
//! if let KeySource::File(path) = &resolved.source {
//!     println!("Using key from {}", path.display());
//! }
//! # Ok::<(), mandrill_cli::api::MandrillError>(())
//! ```

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use super::env::CredentialEnv;
use crate::api::MandrillError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "MANDRILL_APIKEY";

/// Name of the per-user key file, relative to the home directory.
pub const USER_KEY_FILE: &str = ".mandrill.key";

/// Path of the system-wide key file.
pub const SYSTEM_KEY_FILE: &str = "/etc/mandrill.key";

/// Where a resolved key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Supplied directly by the caller.
    Explicit,
    /// Read from [`API_KEY_ENV`].
    Environment,
    /// Read from a key file.
    File(PathBuf),
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit => f.write_str("command line"),
            Self::Environment => write!(f, "{API_KEY_ENV} environment variable"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A non-empty API key together with its origin.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    pub key: String,
    pub source: KeySource,
}

impl fmt::Debug for ResolvedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedKey")
            .field("key", &mask_key(&self.key))
            .field("source", &self.source)
            .finish()
    }
}

/// Returns the key files to try, in order.
///
/// The per-user file is omitted when the home directory is unknown.
pub fn key_file_candidates(env: &impl CredentialEnv) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);
    if let Some(home) = env.home_dir() {
        paths.push(home.join(USER_KEY_FILE));
    }
    paths.push(PathBuf::from(SYSTEM_KEY_FILE));
    paths
}

/// Resolves the API key from the first source that yields a non-empty value.
///
/// An explicit key is returned unchanged. Environment and file values are
/// used as found, except that file contents are trimmed.
///
/// # Errors
///
/// Returns [`MandrillError::Configuration`] when no source yields a key, or
/// when a key file exists but cannot be read.
pub fn resolve_api_key(
    explicit: Option<&str>,
    env: &impl CredentialEnv,
) -> Result<ResolvedKey, MandrillError> {
    if let Some(key) = explicit.filter(|k| !k.is_empty()) {
        return Ok(ResolvedKey {
            key: key.to_string(),
            source: KeySource::Explicit,
        });
    }

    if let Some(key) = env.var(API_KEY_ENV).filter(|k| !k.is_empty()) {
        return Ok(ResolvedKey {
            key,
            source: KeySource::Environment,
        });
    }

    for path in key_file_candidates(env) {
        if !env.exists(&path) {
            continue;
        }

        let content = env.read_to_string(&path).map_err(|e| {
            MandrillError::Configuration(format!(
                "Could not read API key file {}: {}",
                path.display(),
                e
            ))
        })?;

        let key = content.trim();
        if key.is_empty() {
            debug!(path = %path.display(), "key file is empty, skipping");
            continue;
        }

        return Ok(ResolvedKey {
            key: key.to_string(),
            source: KeySource::File(path),
        });
    }

    Err(MandrillError::Configuration(
        "You must provide a Mandrill API key".to_string(),
    ))
}

/// Masks a key for display (shows first and last 4 characters).
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::io;
    use std::path::Path;

    #[derive(Default)]
    struct FakeEnv {
        vars: HashMap<String, String>,
        home: Option<PathBuf>,
        files: HashMap<PathBuf, io::Result<String>>,
    }

    impl FakeEnv {
        fn with_home() -> Self {
            Self {
                home: Some(PathBuf::from("/home/tester")),
                ..Default::default()
            }
        }

        fn with_var(mut self, name: &str, value: &str) -> Self {
            self.vars.insert(name.to_string(), value.to_string());
            self
        }

        fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
            self.files.insert(path.into(), Ok(content.to_string()));
            self
        }

        fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
            self.files.insert(
                path.into(),
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            );
            self
        }
    }

    impl CredentialEnv for FakeEnv {
        fn var(&self, name: &str) -> Option<String> {
            self.vars.get(name).cloned()
        }

        fn home_dir(&self) -> Option<PathBuf> {
            self.home.clone()
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            match self.files.get(path) {
                Some(Ok(content)) => Ok(content.clone()),
                Some(Err(e)) => Err(io::Error::new(e.kind(), e.to_string())),
                None => Err(io::ErrorKind::NotFound.into()),
            }
        }
    }

    const USER_FILE: &str = "/home/tester/.mandrill.key";

    #[test]
    fn test_explicit_wins_over_everything() {
        let env = FakeEnv::with_home()
            .with_var(API_KEY_ENV, "env-key")
            .with_file(USER_FILE, "user-key")
            .with_file(SYSTEM_KEY_FILE, "system-key");

        let resolved = resolve_api_key(Some("explicit-key"), &env).unwrap();
        assert_eq!(resolved.key, "explicit-key");
        assert_eq!(resolved.source, KeySource::Explicit);
    }

    #[test]
    fn test_explicit_is_not_trimmed() {
        let resolved = resolve_api_key(Some(" spaced "), &FakeEnv::default()).unwrap();
        assert_eq!(resolved.key, " spaced ");
    }

    #[test]
    fn test_empty_explicit_falls_through_to_env() {
        let env = FakeEnv::with_home().with_var(API_KEY_ENV, "env-key");
        let resolved = resolve_api_key(Some(""), &env).unwrap();
        assert_eq!(resolved.key, "env-key");
        assert_eq!(resolved.source, KeySource::Environment);
    }

    #[test]
    fn test_env_wins_over_files() {
        let env = FakeEnv::with_home()
            .with_var(API_KEY_ENV, "env-key")
            .with_file(USER_FILE, "user-key");
        assert_eq!(resolve_api_key(None, &env).unwrap().key, "env-key");
    }

    #[test]
    fn test_empty_env_falls_through_to_files() {
        let env = FakeEnv::with_home()
            .with_var(API_KEY_ENV, "")
            .with_file(SYSTEM_KEY_FILE, "system-key");
        let resolved = resolve_api_key(None, &env).unwrap();
        assert_eq!(resolved.key, "system-key");
        assert_eq!(resolved.source, KeySource::File(PathBuf::from(SYSTEM_KEY_FILE)));
    }

    #[test]
    fn test_user_file_wins_over_system_file() {
        let env = FakeEnv::with_home()
            .with_file(USER_FILE, "  user-key\n")
            .with_file(SYSTEM_KEY_FILE, "system-key");
        let resolved = resolve_api_key(None, &env).unwrap();
        assert_eq!(resolved.key, "user-key");
        assert_eq!(resolved.source, KeySource::File(PathBuf::from(USER_FILE)));
    }

    #[test]
    fn test_blank_user_file_falls_through() {
        let env = FakeEnv::with_home()
            .with_file(USER_FILE, " \n\t")
            .with_file(SYSTEM_KEY_FILE, "system-key\n");
        assert_eq!(resolve_api_key(None, &env).unwrap().key, "system-key");
    }

    #[test]
    fn test_no_home_skips_user_file() {
        let env = FakeEnv::default().with_file(SYSTEM_KEY_FILE, "system-key");
        assert_eq!(key_file_candidates(&env), vec![PathBuf::from(SYSTEM_KEY_FILE)]);
        assert_eq!(resolve_api_key(None, &env).unwrap().key, "system-key");
    }

    #[test]
    fn test_nothing_available_is_configuration_error() {
        let err = resolve_api_key(None, &FakeEnv::with_home()).unwrap_err();
        assert!(matches!(err, MandrillError::Configuration(_)));
        assert_eq!(err.to_string(), "You must provide a Mandrill API key");
    }

    #[test]
    fn test_unreadable_file_is_configuration_error() {
        let env = FakeEnv::with_home()
            .with_unreadable(USER_FILE)
            .with_file(SYSTEM_KEY_FILE, "system-key");
        let err = resolve_api_key(None, &env).unwrap_err();
        assert!(matches!(err, MandrillError::Configuration(ref m) if m.contains(USER_FILE)));
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let env = FakeEnv::with_home().with_file(USER_FILE, "user-key");
        let first = resolve_api_key(None, &env).unwrap();
        let second = resolve_api_key(None, &env).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("short"), "*****");
        assert_eq!(mask_key("abcdefghijkl"), "abcd...ijkl");
    }

    #[test]
    fn test_debug_masks_key() {
        let resolved = ResolvedKey {
            key: "abcdefghijkl".to_string(),
            source: KeySource::Explicit,
        };
        let rendered = format!("{resolved:?}");
        assert!(!rendered.contains("abcdefghijkl"));
        assert!(rendered.contains("abcd...ijkl"));
    }
}
