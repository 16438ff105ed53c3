//! Chunking engine for condense-rs.
//!
//! Splits a session's full text into bounded-size blocks under a
//! fixed-length policy. Chunking is pure: no I/O, no side effects, and
//! identical inputs always produce identical block sequences.

pub mod fixed;

pub use fixed::split;

/// Default maximum block length in characters per summarization call.
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 500;

/// Default maximum output length in characters for the built-in capability.
pub const DEFAULT_MAX_OUTPUT_LENGTH: usize = 150;
