//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::chunking::{DEFAULT_MAX_INPUT_LENGTH, DEFAULT_MAX_OUTPUT_LENGTH};
use crate::core::UserId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// condense-rs: per-user message accumulation with chunked summarization.
///
/// Messages accumulate per user in a durable ledger; `summarize` splits
/// the accumulated text into blocks, condenses each block, and clears the
/// session once a summary exists.
#[derive(Parser, Debug)]
#[command(name = "condense-rs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the session database file.
    ///
    /// Defaults to `.condense/sessions.db` in the current directory.
    #[arg(short, long, env = "CONDENSE_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Append a message to a user's session.
    ///
    /// Reads the message from stdin when no text argument is given.
    Add {
        /// The user's identifier.
        user_id: UserId,

        /// Message text.
        text: Option<String>,
    },

    /// Show a user's accumulated text.
    Show {
        /// The user's identifier.
        user_id: UserId,
    },

    /// Show ledger statistics.
    Status,

    /// Preview how a user's accumulated text would be split into blocks.
    Blocks {
        /// The user's identifier.
        user_id: UserId,

        /// Maximum block length in characters.
        #[arg(long, default_value_t = DEFAULT_MAX_INPUT_LENGTH)]
        max_input_length: usize,
    },

    /// Summarize a user's accumulated messages and clear the session.
    Summarize {
        /// The user's identifier.
        user_id: UserId,

        /// Maximum block length in characters.
        #[arg(long, default_value_t = DEFAULT_MAX_INPUT_LENGTH)]
        max_input_length: usize,

        /// Maximum summary length in characters per block.
        #[arg(long, default_value_t = DEFAULT_MAX_OUTPUT_LENGTH)]
        max_output_length: usize,

        /// Summarizer strategy (extractive).
        #[arg(short, long, default_value = "extractive")]
        summarizer: String,
    },

    /// Delete a user's accumulated messages without summarizing.
    Clear {
        /// The user's identifier.
        user_id: UserId,

        /// Skip confirmation.
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

impl Cli {
    /// Resolves the database path, falling back to the default.
    #[must_use]
    pub fn get_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::ledger::DEFAULT_DB_PATH))
    }
}
