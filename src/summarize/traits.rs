//! Summarizer capability trait.
//!
//! Defines the single-method contract for the external inference boundary.
//! The merge driver treats implementations as opaque, possibly slow,
//! possibly failing functions.

use crate::error::Result;

/// Capability for condensing one block of text.
///
/// Implementations must be `Send + Sync`: the same capability instance is
/// shared across concurrent summarize calls for different users. The
/// maximum output length is injected at construction time.
///
/// # Examples
///
/// ```
/// use condense_rs::summarize::{ExtractiveSummarizer, Summarizer};
///
/// let summarizer = ExtractiveSummarizer::new(150);
/// let summary = summarizer.summarize("First point. Second point.").unwrap();
/// assert!(!summary.is_empty());
/// ```
pub trait Summarizer: Send + Sync {
    /// Condenses one block of text into a shorter version.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails; the merge driver aborts the
    /// whole summarize call on the first failing block.
    fn summarize(&self, block: &str) -> Result<String>;

    /// Returns the name of the summarization strategy.
    fn name(&self) -> &'static str;
}
