//! Colored console output for pipeline progress

use colored::Colorize;
use std::fmt::Display;

/// Step headline, e.g. "Installing dependencies..."
pub fn info(message: impl Display) {
    println!("{}", message.to_string().cyan());
}

/// Per-path detail printed while materializing files
pub fn verbose(message: impl Display) {
    println!("  {}", message.to_string().dimmed());
}

pub fn success(message: impl Display) {
    println!("{}", message.to_string().green());
}

pub fn error(message: impl Display) {
    eprintln!("{}", message.to_string().red());
}
