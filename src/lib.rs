//! # condense-rs
//!
//! Per-user message accumulation with a chunked-summarization pipeline.
//!
//! condense-rs accumulates free-form text messages per user in a durable
//! `SQLite` ledger and, on demand, produces a single condensed summary of
//! everything accumulated since the last summarization. Long sessions are
//! split into bounded blocks, each block is condensed through an injected
//! capability, and the partial summaries are joined in order.
//!
//! ## Features
//!
//! - **Durable sessions**: fragments survive process restarts and support
//!   overlapping readers and writers
//! - **Fixed-length chunking**: lossless, deterministic splitting at
//!   character boundaries
//! - **Capability seam**: summarization backends plug in behind a
//!   single-method trait; a deterministic extractive fallback is built in
//! - **Retry-safe pipeline**: a session is cleared only after its summary
//!   exists

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod chunking;
pub mod cli;
pub mod core;
pub mod error;
pub mod ledger;
pub mod pipeline;
pub mod session;
pub mod summarize;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use crate::core::{Block, UserId};

// Re-export ledger types
pub use ledger::{DEFAULT_DB_PATH, Ledger, LedgerStats, SqliteLedger};

// Re-export chunking types
pub use chunking::{DEFAULT_MAX_INPUT_LENGTH, DEFAULT_MAX_OUTPUT_LENGTH, split};

// Re-export session and pipeline types
pub use pipeline::Coordinator;
pub use session::SessionAccumulator;

// Re-export summarization types
pub use summarize::{
    ExtractiveSummarizer, Summarizer, available_summarizers, create_summarizer, merge_summarize,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
