//
//  mandrill-cli
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output Formatting
//!
//! Writes API responses as JSON for scripting and automation.
//!
//! | Function | Description | Use Case |
//! |----------|-------------|----------|
//! | [`write_json`] | Pretty-printed JSON | Human-readable output |
//! | [`write_json_compact`] | Minified JSON | Piping to other tools |
//! | [`write_json_to`] | Either, to any writer | Tests, files |

use serde::Serialize;
use std::io::{self, Write};

/// Writes a value as pretty-printed JSON to stdout.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    write_json_to(&mut io::stdout().lock(), value, true)
}

/// Writes a value as single-line JSON to stdout.
pub fn write_json_compact<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    write_json_to(&mut io::stdout().lock(), value, false)
}

/// Writes a value as JSON to `writer`, followed by a newline.
///
/// # Example
///
/// ```rust
/// use mandrill_cli::output::write_json_to;
///
/// let mut buf = Vec::new();
/// write_json_to(&mut buf, &serde_json::json!({"PING": "PONG!"}), false)?;
/// assert_eq!(String::from_utf8(buf)?, "{\"PING\":\"PONG!\"}\n");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
    pretty: bool,
) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)?;
    } else {
        serde_json::to_writer(&mut *writer, value)?;
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_output() {
        let mut buf = Vec::new();
        write_json_to(&mut buf, &json!({"name": "test"}), true).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\n  \"name\": \"test\"\n}\n");
    }

    #[test]
    fn test_compact_output() {
        let mut buf = Vec::new();
        write_json_to(&mut buf, &json!([1, 2]), false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[1,2]\n");
    }
}
