//! CLI command implementations.
//!
//! The CLI plays the transport-layer role: it delivers `(user, text)`
//! pairs to the session accumulator and issues summarize triggers.

use crate::chunking::split;
use crate::cli::output::{
    OutputFormat, format_blocks, format_session, format_status, format_summary,
};
use crate::cli::parser::{Cli, Commands};
use crate::core::UserId;
use crate::error::{CommandError, Result};
use crate::ledger::{Ledger, SqliteLedger};
use crate::pipeline::Coordinator;
use crate::session::SessionAccumulator;
use crate::summarize::{Summarizer, create_summarizer};
use std::fmt::Write as FmtWrite;
use std::io::Read;
use std::sync::Arc;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let db_path = cli.get_db_path();

    let ledger = Arc::new(SqliteLedger::open(&db_path)?);
    let result = run_command(cli, &ledger, format);

    // Release the storage handle on every exit path; Drop backs this up
    // if run_command panicked.
    ledger.shutdown()?;
    result
}

fn run_command(cli: &Cli, ledger: &Arc<SqliteLedger>, format: OutputFormat) -> Result<String> {
    match &cli.command {
        Commands::Add { user_id, text } => cmd_add(ledger, *user_id, text.as_deref(), format),
        Commands::Show { user_id } => cmd_show(ledger, *user_id, format),
        Commands::Status => cmd_status(ledger, format),
        Commands::Blocks {
            user_id,
            max_input_length,
        } => cmd_blocks(ledger, *user_id, *max_input_length, format),
        Commands::Summarize {
            user_id,
            max_input_length,
            max_output_length,
            summarizer,
        } => cmd_summarize(
            ledger,
            *user_id,
            *max_input_length,
            *max_output_length,
            summarizer,
            format,
        ),
        Commands::Clear { user_id, yes } => cmd_clear(ledger, *user_id, *yes, format),
    }
}

fn sessions(ledger: &Arc<SqliteLedger>) -> SessionAccumulator {
    SessionAccumulator::new(Arc::clone(ledger) as Arc<dyn Ledger>)
}

// ==================== Command Implementations ====================

fn cmd_add(
    ledger: &Arc<SqliteLedger>,
    user_id: UserId,
    text: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    // Read the message from stdin if not provided
    let text = if let Some(t) = text {
        t.to_string()
    } else {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map_err(|e| {
            CommandError::ExecutionFailed(format!("Failed to read from stdin: {e}"))
        })?;
        buffer.trim_end_matches('\n').to_string()
    };

    if text.trim().is_empty() {
        return Err(CommandError::InvalidArgument("message text is empty".to_string()).into());
    }

    sessions(ledger).add(user_id, &text)?;

    match format {
        OutputFormat::Text => Ok(format!("Stored message for user {user_id}.\n")),
        OutputFormat::Json => Ok(serde_json::json!({
            "user_id": user_id,
            "stored": true,
        })
        .to_string()),
    }
}

fn cmd_show(ledger: &Arc<SqliteLedger>, user_id: UserId, format: OutputFormat) -> Result<String> {
    let fragments = ledger.read_all(user_id)?;
    Ok(format_session(
        user_id,
        fragments.len(),
        &fragments.join(" "),
        format,
    ))
}

fn cmd_status(ledger: &Arc<SqliteLedger>, format: OutputFormat) -> Result<String> {
    let stats = ledger.stats()?;
    Ok(format_status(&stats, format))
}

fn cmd_blocks(
    ledger: &Arc<SqliteLedger>,
    user_id: UserId,
    max_input_length: usize,
    format: OutputFormat,
) -> Result<String> {
    let full_text = sessions(ledger).full_text(user_id)?;
    let blocks = split(&full_text, max_input_length)?;
    Ok(format_blocks(&blocks, format))
}

fn cmd_summarize(
    ledger: &Arc<SqliteLedger>,
    user_id: UserId,
    max_input_length: usize,
    max_output_length: usize,
    summarizer_name: &str,
    format: OutputFormat,
) -> Result<String> {
    let summarizer: Arc<dyn Summarizer> =
        Arc::from(create_summarizer(summarizer_name, max_output_length)?);
    let coordinator = Coordinator::new(sessions(ledger), summarizer, max_input_length)?;

    match coordinator.request_summarize(user_id) {
        Ok(summary) => Ok(format_summary(user_id, &summary, format)),
        // Expected rejection, not a fault: report it as normal output
        Err(e) if e.is_no_pending() => match format {
            OutputFormat::Text => {
                let mut out = String::new();
                let _ = writeln!(out, "No messages stored for user {user_id} yet.");
                Ok(out)
            }
            OutputFormat::Json => Ok(serde_json::json!({
                "user_id": user_id,
                "summary": serde_json::Value::Null,
                "reason": "no pending messages",
            })
            .to_string()),
        },
        Err(e) => Err(e),
    }
}

fn cmd_clear(
    ledger: &Arc<SqliteLedger>,
    user_id: UserId,
    yes: bool,
    format: OutputFormat,
) -> Result<String> {
    if !yes {
        return Err(CommandError::ExecutionFailed(
            "Use --yes to confirm clearing the session.".to_string(),
        )
        .into());
    }

    sessions(ledger).clear(user_id)?;

    match format {
        OutputFormat::Text => Ok(format!("Cleared session for user {user_id}.\n")),
        OutputFormat::Json => Ok(serde_json::json!({
            "user_id": user_id,
            "cleared": true,
        })
        .to_string()),
    }
}
