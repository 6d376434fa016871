//
//  mandrill-cli
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O Module
//!
//! Low-level file operations shared by the configuration layer and the API
//! key resolver.
//!
//! ## Notes
//!
//! - All functions accept `&Path` to support both `Path` and `PathBuf`
//! - Write operations automatically create parent directories
//! - Errors are plain [`std::io::Error`]s; callers attach context

use std::io;
use std::path::Path;

/// Reads the contents of a configuration file.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be opened, or does
/// not contain valid UTF-8.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use mandrill_cli::config::read_config_file;
///
/// let content = read_config_file(Path::new("/etc/mandrill.key"))?;
/// println!("{} bytes", content.len());
/// # Ok::<(), std::io::Error>(())
/// ```
///
/// # Notes
///
/// - The returned string includes any trailing newlines from the file
pub fn read_config_file(path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
}

/// Writes content to a configuration file.
///
/// Creates or overwrites the specified file with the given content,
/// creating any missing parent directories first.
///
/// # Errors
///
/// Returns an error if a parent directory cannot be created or the file
/// cannot be written.
pub fn write_config_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

/// Checks if a configuration file exists.
///
/// Returns `false` for directories and for paths that cannot be accessed.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}
