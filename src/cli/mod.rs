//! CLI layer for condense-rs.
//!
//! Provides the command-line interface using clap, with commands for
//! accumulating messages, inspecting sessions, and summarizing.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
