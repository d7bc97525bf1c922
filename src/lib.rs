//! Rapidshorts - short video generator (TUI Edition)
//!
//! Collects text, styling, voice, template and a profile photo through a
//! step-by-step wizard and submits them to the remote video service.

pub mod config;
pub mod core;
pub mod tui;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
