//! Extractive fallback summarizer.
//!
//! Provides a deterministic built-in capability when no model-serving
//! backend is wired in. Takes leading sentences up to an output-length
//! budget; this is NOT abstractive summarization, it is lexical truncation
//! at sentence boundaries.

use crate::error::Result;
use crate::summarize::traits::Summarizer;

/// Deterministic extractive summarizer.
///
/// Emits the block's leading sentences until the output budget is
/// exhausted; a sentence that would overflow the budget is dropped along
/// with everything after it. A block whose first sentence already exceeds
/// the budget is truncated at a character boundary instead.
///
/// # Examples
///
/// ```
/// use condense_rs::summarize::{ExtractiveSummarizer, Summarizer};
///
/// let summarizer = ExtractiveSummarizer::new(20);
/// let out = summarizer.summarize("Short one. A much longer second sentence.").unwrap();
/// assert_eq!(out, "Short one.");
/// ```
pub struct ExtractiveSummarizer {
    /// Maximum output length in characters.
    max_output_length: usize,
}

impl ExtractiveSummarizer {
    /// Creates a new extractive summarizer with the given output budget.
    #[must_use]
    pub const fn new(max_output_length: usize) -> Self {
        Self { max_output_length }
    }

    /// Splits text at sentence-terminating punctuation, keeping the
    /// terminator with its sentence.
    fn sentences(text: &str) -> Vec<&str> {
        let mut out = Vec::new();
        let mut start = 0;
        let mut prev_end = 0;

        for (pos, ch) in text.char_indices() {
            let end = pos + ch.len_utf8();
            if matches!(ch, '.' | '!' | '?') {
                out.push(text[start..end].trim());
                start = end;
            }
            prev_end = end;
        }
        if start < prev_end {
            let tail = text[start..].trim();
            if !tail.is_empty() {
                out.push(tail);
            }
        }
        out
    }

    /// Truncates text to at most `max_chars` characters.
    fn truncate_chars(text: &str, max_chars: usize) -> &str {
        match text.char_indices().nth(max_chars) {
            Some((pos, _)) => &text[..pos],
            None => text,
        }
    }
}

impl Summarizer for ExtractiveSummarizer {
    fn summarize(&self, block: &str) -> Result<String> {
        let trimmed = block.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let mut out = String::new();
        for sentence in Self::sentences(trimmed) {
            let needed = if out.is_empty() {
                sentence.chars().count()
            } else {
                sentence.chars().count() + 1
            };
            if out.chars().count() + needed > self.max_output_length {
                break;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(sentence);
        }

        if out.is_empty() {
            out = Self::truncate_chars(trimmed, self.max_output_length).to_string();
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "extractive"
    }
}
