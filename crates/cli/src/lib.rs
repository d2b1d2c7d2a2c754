//! CLI tool for inspecting consistent hash rings.
//!
//! Builds a ring from command-line node specs and reports:
//! - Which node owns a key
//! - How a batch of synthetic keys spreads across nodes
//! - The clockwise successor list for a key

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
