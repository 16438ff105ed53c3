//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::{Block, UserId};
use crate::error::Error;
use crate::ledger::LedgerStats;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a status response.
#[must_use]
pub fn format_status(stats: &LedgerStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_status_text(stats),
        OutputFormat::Json => format_json(stats),
    }
}

fn format_status_text(stats: &LedgerStats) -> String {
    let mut output = String::new();
    output.push_str("condense-rs Status\n");
    output.push_str("==================\n\n");
    let _ = writeln!(output, "  Users:       {}", stats.user_count);
    let _ = writeln!(output, "  Fragments:   {}", stats.fragment_count);
    let _ = writeln!(
        output,
        "  Stored text: {}",
        format_size(stats.total_text_size)
    );
    let _ = writeln!(output, "  Schema:      v{}", stats.schema_version);
    if let Some(size) = stats.db_size {
        let _ = writeln!(output, "  DB size:     {size} bytes");
    }
    output
}

/// Formats one user's session state.
#[must_use]
pub fn format_session(
    user_id: UserId,
    fragment_count: usize,
    full_text: &str,
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "User {user_id}: {fragment_count} fragment(s)");
            if full_text.is_empty() {
                output.push_str("(no pending messages)\n");
            } else {
                output.push_str(full_text);
                output.push('\n');
            }
            output
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct SessionOutput<'a> {
                user_id: UserId,
                fragment_count: usize,
                full_text: &'a str,
            }
            format_json(&SessionOutput {
                user_id,
                fragment_count,
                full_text,
            })
        }
    }
}

/// Formats a block preview.
#[must_use]
pub fn format_blocks(blocks: &[Block], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if blocks.is_empty() {
                return "No blocks (session is empty).\n".to_string();
            }

            let mut output = String::new();
            let _ = writeln!(output, "{} block(s):", blocks.len());
            let _ = writeln!(
                output,
                "{:<6} {:<12} {:<12} {:<10} Preview",
                "Index", "Start", "End", "Chars"
            );
            output.push_str(&"-".repeat(70));
            output.push('\n');

            for block in blocks {
                let preview = truncate(&block.content.replace('\n', "\\n"), 30);
                let _ = writeln!(
                    output,
                    "{:<6} {:<12} {:<12} {:<10} {}",
                    block.index,
                    block.byte_range.start,
                    block.byte_range.end,
                    block.char_len(),
                    preview
                );
            }
            output
        }
        OutputFormat::Json => format_json(&blocks),
    }
}

/// Formats a produced summary.
#[must_use]
pub fn format_summary(user_id: UserId, summary: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = summary.to_string();
            if !output.ends_with('\n') {
                output.push('\n');
            }
            output
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct SummaryOutput<'a> {
                user_id: UserId,
                summary: &'a str,
            }
            format_json(&SummaryOutput { user_id, summary })
        }
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(err: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => err.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput {
                error: String,
            }
            format_json(&ErrorOutput {
                error: err.to_string(),
            })
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a byte size as human-readable.
#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Truncates a string to max length with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
