//
//  mandrill-cli
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting
//!
//! JSON writers for API responses plus small helpers for human-readable
//! status output on stdout.

mod json;

pub use json::*;

use console::style;

/// Prints a styled header underlined with ASCII dashes.
pub fn print_header(text: &str) {
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a key-value pair, dimming the key when color is enabled.
pub fn print_field(key: &str, value: &str, color: bool) {
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

/// Writes a success message to stdout.
pub fn write_success(msg: &str, color: bool) {
    if color {
        println!("{} {}", style("✓").green().bold(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Returns `true` when stdout is a terminal that supports color.
pub fn color_enabled() -> bool {
    console::colors_enabled()
}
