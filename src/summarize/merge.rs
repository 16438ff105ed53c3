//! Summarization merge driver.
//!
//! Drives the injected [`Summarizer`] capability across the blocks of a
//! split, strictly in order, and joins the partial summaries. The output
//! preserves block order so the final summary stays roughly chronological.

use crate::chunking::split;
use crate::error::{Result, SummarizeError};
use crate::summarize::traits::Summarizer;
use tracing::debug;

/// Summarizes `text` block-by-block and merges the results.
///
/// Splits `text` into blocks of at most `max_input_length` characters,
/// invokes the capability once per block in block order, and joins the
/// returned strings with single spaces. Empty input returns the empty
/// string without invoking the capability.
///
/// # Errors
///
/// Returns [`SummarizeError::BlockFailed`] identifying the failing block
/// if the capability fails for any block; no partial summary is returned.
/// Propagates [`crate::error::ChunkingError::InvalidConfig`] for a zero
/// `max_input_length`.
///
/// # Examples
///
/// ```
/// use condense_rs::summarize::{ExtractiveSummarizer, merge_summarize};
///
/// let summarizer = ExtractiveSummarizer::new(150);
/// let summary = merge_summarize("Hello! How are you?", 500, &summarizer).unwrap();
/// assert_eq!(summary, "Hello! How are you?");
/// ```
pub fn merge_summarize(
    text: &str,
    max_input_length: usize,
    summarizer: &dyn Summarizer,
) -> Result<String> {
    let blocks = split(text, max_input_length)?;
    if blocks.is_empty() {
        return Ok(String::new());
    }

    debug!(
        blocks = blocks.len(),
        strategy = summarizer.name(),
        "summarizing blocks"
    );

    let mut parts = Vec::with_capacity(blocks.len());
    for block in &blocks {
        let part =
            summarizer
                .summarize(&block.content)
                .map_err(|e| SummarizeError::BlockFailed {
                    index: block.index,
                    reason: e.to_string(),
                })?;
        parts.push(part);
    }

    Ok(parts.join(" "))
}
