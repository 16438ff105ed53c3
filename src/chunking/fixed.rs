//! Fixed-length splitting.
//!
//! Provides character-based splitting with exact block sizes. Respects
//! UTF-8 character boundaries to avoid splitting multi-byte characters.

use crate::core::Block;
use crate::error::{ChunkingError, Result};

/// Splits `text` into blocks of exactly `max_len` characters.
///
/// Every block except possibly the last has exactly `max_len` characters;
/// the last carries the remainder. Blocks never overlap and never reorder
/// characters, so concatenating them in index order reproduces `text`
/// byte-for-byte. Empty input yields an empty block sequence.
///
/// # Arguments
///
/// * `text` - The input text to split.
/// * `max_len` - Maximum block length in characters. Must be > 0.
///
/// # Errors
///
/// Returns [`ChunkingError::InvalidConfig`] if `max_len` is zero.
///
/// # Examples
///
/// ```
/// use condense_rs::chunking::split;
///
/// let blocks = split(&"A".repeat(1000), 500).unwrap();
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].char_len(), 500);
/// assert_eq!(blocks[1].char_len(), 500);
/// ```
pub fn split(text: &str, max_len: usize) -> Result<Vec<Block>> {
    if max_len == 0 {
        return Err(ChunkingError::InvalidConfig {
            reason: "max_input_length must be > 0".to_string(),
        }
        .into());
    }

    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut blocks = Vec::with_capacity(text.len() / max_len + 1);
    let mut start = 0;
    let mut count = 0;
    let mut index = 0;

    for (pos, _) in text.char_indices() {
        if count == max_len {
            blocks.push(Block::new(text[start..pos].to_string(), start..pos, index));
            index += 1;
            start = pos;
            count = 0;
        }
        count += 1;
    }
    blocks.push(Block::new(
        text[start..].to_string(),
        start..text.len(),
        index,
    ));

    Ok(blocks)
}
