//! Output helpers for CLI commands.

use serde::Serialize;

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    println!("{json}");
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}
