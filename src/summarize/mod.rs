//! Summarization layer for condense-rs.
//!
//! Provides the [`Summarizer`] capability trait (the external inference
//! boundary), the merge driver that applies a capability across blocks,
//! and a deterministic extractive fallback implementation.

pub mod extractive;
pub mod merge;
pub mod traits;

pub use extractive::ExtractiveSummarizer;
pub use merge::merge_summarize;
pub use traits::Summarizer;

use crate::error::{Result, SummarizeError};

/// Creates a summarizer by name.
///
/// # Arguments
///
/// * `name` - Summarizer strategy name. `"extractive"` is the only
///   built-in; model-backed capabilities are supplied by callers.
/// * `max_output_length` - Output budget in characters per block.
///
/// # Errors
///
/// Returns [`SummarizeError::UnknownSummarizer`] for unrecognized names.
pub fn create_summarizer(name: &str, max_output_length: usize) -> Result<Box<dyn Summarizer>> {
    match name.to_lowercase().as_str() {
        "extractive" => Ok(Box::new(ExtractiveSummarizer::new(max_output_length))),
        _ => Err(SummarizeError::UnknownSummarizer {
            name: name.to_string(),
        }
        .into()),
    }
}

/// Lists available summarizer strategy names.
#[must_use]
pub fn available_summarizers() -> Vec<&'static str> {
    vec!["extractive"]
}
