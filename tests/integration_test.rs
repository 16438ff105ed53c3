//! Integration tests for condense-rs.

#![allow(clippy::expect_used)]

use condense_rs::error::{Error, PipelineError, SummarizeError};
use condense_rs::ledger::{Ledger, SqliteLedger};
use condense_rs::pipeline::Coordinator;
use condense_rs::session::SessionAccumulator;
use condense_rs::summarize::{ExtractiveSummarizer, Summarizer, merge_summarize};
use std::sync::Arc;
use tempfile::TempDir;

/// Helper to create a test ledger on disk.
fn create_test_ledger() -> (Arc<SqliteLedger>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let ledger = SqliteLedger::open(&db_path).expect("Failed to create ledger");
    (Arc::new(ledger), temp_dir)
}

/// Capability stub that tags each block it sees.
struct PrefixSummarizer;

impl Summarizer for PrefixSummarizer {
    fn summarize(&self, block: &str) -> condense_rs::Result<String> {
        Ok(format!("S:{block}"))
    }
    fn name(&self) -> &'static str {
        "prefix"
    }
}

/// Capability stub that always fails.
struct BrokenSummarizer;

impl Summarizer for BrokenSummarizer {
    fn summarize(&self, _block: &str) -> condense_rs::Result<String> {
        Err(SummarizeError::Backend("model unavailable".to_string()).into())
    }
    fn name(&self) -> &'static str {
        "broken"
    }
}

#[test]
fn test_ledger_crud() {
    let (ledger, _temp) = create_test_ledger();

    assert!(!ledger.exists(1).expect("exists failed"));

    ledger.append(1, "Hello!").expect("append failed");
    assert!(ledger.exists(1).expect("exists failed"));

    let texts = ledger.read_all(1).expect("read_all failed");
    assert_eq!(texts, vec!["Hello!"]);

    ledger.clear(1).expect("clear failed");
    assert!(!ledger.exists(1).expect("exists failed"));
    assert!(ledger.read_all(1).expect("read_all failed").is_empty());
}

#[test]
fn test_fragments_survive_restart() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("restart.db");

    {
        let ledger = SqliteLedger::open(&db_path).expect("Failed to create ledger");
        ledger.append(1, "before restart").expect("append failed");
        ledger.append(1, "second fragment").expect("append failed");
        ledger.shutdown().expect("shutdown failed");
    }

    let ledger = SqliteLedger::open(&db_path).expect("Failed to reopen ledger");
    let texts = ledger.read_all(1).expect("read_all failed");
    assert_eq!(texts, vec!["before restart", "second fragment"]);
}

#[test]
fn test_single_message_round_trip() {
    let (ledger, _temp) = create_test_ledger();
    let sessions = SessionAccumulator::new(ledger as Arc<dyn Ledger>);

    sessions.add(1, "Hello!").expect("add failed");
    assert_eq!(sessions.full_text(1).expect("full_text failed"), "Hello!");
}

#[test]
fn test_two_messages_joined() {
    let (ledger, _temp) = create_test_ledger();
    let sessions = SessionAccumulator::new(ledger as Arc<dyn Ledger>);

    sessions.add(1, "Hello!").expect("add failed");
    sessions.add(1, "How are you?").expect("add failed");
    assert_eq!(
        sessions.full_text(1).expect("full_text failed"),
        "Hello! How are you?"
    );
}

#[test]
fn test_summarize_merges_blocks_in_order() {
    let text = "A".repeat(750);
    let summary = merge_summarize(&text, 500, &PrefixSummarizer).expect("merge failed");
    assert_eq!(summary, format!("S:{} S:{}", "A".repeat(500), "A".repeat(250)));
}

#[test]
fn test_pipeline_end_to_end() {
    let (ledger, _temp) = create_test_ledger();
    let sessions = SessionAccumulator::new(ledger as Arc<dyn Ledger>);
    let coordinator =
        Coordinator::new(sessions.clone(), Arc::new(PrefixSummarizer), 500).expect("coordinator");

    sessions.add(1, "Hello!").expect("add failed");
    sessions.add(1, "How are you?").expect("add failed");

    let summary = coordinator.request_summarize(1).expect("summarize failed");
    assert_eq!(summary, "S:Hello! How are you?");

    // The session is cleared only after the summary exists
    assert!(!sessions.has_pending(1).expect("has_pending failed"));
    assert_eq!(sessions.full_text(1).expect("full_text failed"), "");
}

#[test]
fn test_pipeline_chunks_long_session() {
    let (ledger, _temp) = create_test_ledger();
    let sessions = SessionAccumulator::new(ledger as Arc<dyn Ledger>);
    let coordinator =
        Coordinator::new(sessions.clone(), Arc::new(PrefixSummarizer), 10).expect("coordinator");

    sessions.add(1, &"A".repeat(25)).expect("add failed");

    let summary = coordinator.request_summarize(1).expect("summarize failed");
    assert_eq!(
        summary,
        format!("S:{} S:{} S:{}", "A".repeat(10), "A".repeat(10), "A".repeat(5))
    );
}

#[test]
fn test_summarize_without_messages_is_rejected() {
    let (ledger, _temp) = create_test_ledger();
    let sessions = SessionAccumulator::new(ledger as Arc<dyn Ledger>);
    let coordinator =
        Coordinator::new(sessions.clone(), Arc::new(PrefixSummarizer), 500).expect("coordinator");

    let err = coordinator.request_summarize(42).expect_err("must reject");
    assert!(matches!(
        err,
        Error::Pipeline(PipelineError::NoPendingMessages { user_id: 42 })
    ));
    assert!(err.is_no_pending());
    assert!(!sessions.has_pending(42).expect("has_pending failed"));
}

#[test]
fn test_failed_summarize_preserves_session() {
    let (ledger, _temp) = create_test_ledger();
    let sessions = SessionAccumulator::new(ledger as Arc<dyn Ledger>);
    let coordinator =
        Coordinator::new(sessions.clone(), Arc::new(BrokenSummarizer), 500).expect("coordinator");

    sessions.add(1, "precious data").expect("add failed");
    let before = sessions.full_text(1).expect("full_text failed");

    let err = coordinator.request_summarize(1).expect_err("must fail");
    assert!(matches!(err, Error::Summarize(_)));

    let after = sessions.full_text(1).expect("full_text failed");
    assert_eq!(before, after);
    assert!(sessions.has_pending(1).expect("has_pending failed"));
}

#[test]
fn test_extractive_pipeline_produces_bounded_summary() {
    let (ledger, _temp) = create_test_ledger();
    let sessions = SessionAccumulator::new(ledger as Arc<dyn Ledger>);
    let coordinator = Coordinator::new(
        sessions.clone(),
        Arc::new(ExtractiveSummarizer::new(40)),
        500,
    )
    .expect("coordinator");

    sessions
        .add(1, "The meeting is at noon. Bring the draft. Ignore the rest of this.")
        .expect("add failed");

    let summary = coordinator.request_summarize(1).expect("summarize failed");
    assert_eq!(summary, "The meeting is at noon. Bring the draft.");
}

#[test]
fn test_interleaved_users_do_not_mix() {
    let (ledger, _temp) = create_test_ledger();
    let sessions = SessionAccumulator::new(ledger as Arc<dyn Ledger>);

    sessions.add(1, "one-a").expect("add failed");
    sessions.add(2, "two-a").expect("add failed");
    sessions.add(1, "one-b").expect("add failed");
    sessions.add(2, "two-b").expect("add failed");

    assert_eq!(sessions.full_text(1).expect("full_text"), "one-a one-b");
    assert_eq!(sessions.full_text(2).expect("full_text"), "two-a two-b");

    sessions.clear(1).expect("clear failed");
    assert_eq!(sessions.full_text(1).expect("full_text"), "");
    assert_eq!(sessions.full_text(2).expect("full_text"), "two-a two-b");
}

#[test]
fn test_concurrent_appenders_preserve_per_user_order() {
    let (ledger, _temp) = create_test_ledger();
    let mut handles = Vec::new();

    for user in 0..4i64 {
        let ledger = Arc::clone(&ledger);
        handles.push(std::thread::spawn(move || {
            for i in 0..20 {
                ledger
                    .append(user, &format!("u{user}-{i}"))
                    .expect("append failed");
            }
        }));
    }
    for handle in handles {
        handle.join().expect("thread panicked");
    }

    for user in 0..4i64 {
        let texts = ledger.read_all(user).expect("read_all failed");
        assert_eq!(texts.len(), 20);
        for (i, text) in texts.iter().enumerate() {
            assert_eq!(text, &format!("u{user}-{i}"));
        }
    }
}

#[test]
fn test_concurrent_summarizes_for_distinct_users() {
    let (ledger, _temp) = create_test_ledger();
    let sessions = SessionAccumulator::new(ledger as Arc<dyn Ledger>);
    let coordinator = Arc::new(
        Coordinator::new(sessions.clone(), Arc::new(PrefixSummarizer), 500).expect("coordinator"),
    );

    for user in 0..4i64 {
        sessions
            .add(user, &format!("message from {user}"))
            .expect("add failed");
    }

    let mut handles = Vec::new();
    for user in 0..4i64 {
        let coordinator = Arc::clone(&coordinator);
        handles.push(std::thread::spawn(move || {
            coordinator.request_summarize(user).expect("summarize")
        }));
    }
    for (user, handle) in handles.into_iter().enumerate() {
        let summary = handle.join().expect("thread panicked");
        assert_eq!(summary, format!("S:message from {user}"));
    }

    for user in 0..4i64 {
        assert!(!sessions.has_pending(user).expect("has_pending"));
    }
}

#[test]
fn test_shutdown_releases_ledger() {
    let (ledger, _temp) = create_test_ledger();
    ledger.append(1, "Hello").expect("append failed");
    ledger.shutdown().expect("shutdown failed");

    assert!(ledger.append(1, "more").is_err());
    assert!(ledger.read_all(1).is_err());
}
