//! Error types for condense-rs operations.
//!
//! This module provides the error hierarchy using `thiserror` for all
//! operations including the fragment ledger, chunking, summarization, and
//! the pipeline coordinator.

use crate::core::UserId;
use thiserror::Error;

/// Result type alias for condense-rs operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for condense-rs operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Storage-related errors (ledger database operations).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Chunking-related errors (text splitting).
    #[error("chunking error: {0}")]
    Chunking(#[from] ChunkingError),

    /// Summarization errors (the injected capability failed).
    #[error("summarization error: {0}")]
    Summarize(#[from] SummarizeError),

    /// Pipeline coordination errors (rejected summarize requests).
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

impl Error {
    /// Returns true if this is the normal "no pending messages" rejection.
    ///
    /// Callers are expected to check this explicitly before treating a
    /// summarize failure as a system fault.
    #[must_use]
    pub const fn is_no_pending(&self) -> bool {
        matches!(
            self,
            Self::Pipeline(PipelineError::NoPendingMessages { .. })
        )
    }
}

/// Storage-specific errors for ledger database operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(String),

    /// The ledger was shut down; its connection is released.
    #[error("ledger is closed")]
    Closed,

    /// Schema migration error.
    #[error("migration error: {0}")]
    Migration(String),
}

/// Chunking-specific errors for text splitting.
#[derive(Error, Debug)]
pub enum ChunkingError {
    /// Invalid chunking configuration.
    #[error("invalid chunk configuration: {reason}")]
    InvalidConfig {
        /// Reason the configuration is invalid.
        reason: String,
    },
}

/// Summarization errors from the merge driver.
#[derive(Error, Debug)]
pub enum SummarizeError {
    /// The injected capability failed for a specific block.
    #[error("summarization failed for block {index}: {reason}")]
    BlockFailed {
        /// Zero-based index of the block that failed.
        index: usize,
        /// Reason reported by the capability.
        reason: String,
    },

    /// Unknown summarizer name passed to the factory.
    #[error("unknown summarizer: {name}")]
    UnknownSummarizer {
        /// Name that was not recognized.
        name: String,
    },

    /// The capability backend reported a failure.
    #[error("summarizer backend error: {0}")]
    Backend(String),
}

/// Pipeline coordinator errors.
///
/// These are rejected-request signals rather than system faults: the
/// session state is unchanged when they are returned.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Summarize was requested for a user with an empty session.
    #[error("no pending messages for user {user_id}")]
    NoPendingMessages {
        /// The user whose session is empty.
        user_id: UserId,
    },

    /// A summarize call for this user is already executing.
    #[error("summarize already in flight for user {user_id}")]
    SummarizeInFlight {
        /// The user with a summarize call in flight.
        user_id: UserId,
    },
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Database(err.to_string()))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config {
            message: "bad config".to_string(),
        };
        assert_eq!(err.to_string(), "configuration error: bad config");
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Closed;
        assert_eq!(err.to_string(), "ledger is closed");

        let err = StorageError::Database("locked".to_string());
        assert!(err.to_string().contains("locked"));

        let err = StorageError::Migration("schema error".to_string());
        assert!(err.to_string().contains("schema error"));
    }

    #[test]
    fn test_chunking_error_display() {
        let err = ChunkingError::InvalidConfig {
            reason: "max_input_length must be > 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid chunk configuration: max_input_length must be > 0"
        );
    }

    #[test]
    fn test_summarize_error_display() {
        let err = SummarizeError::BlockFailed {
            index: 3,
            reason: "backend timeout".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "summarization failed for block 3: backend timeout"
        );

        let err = SummarizeError::UnknownSummarizer {
            name: "t5".to_string(),
        };
        assert!(err.to_string().contains("t5"));
    }

    #[test]
    fn test_pipeline_error_display() {
        let err = PipelineError::NoPendingMessages { user_id: 42 };
        assert_eq!(err.to_string(), "no pending messages for user 42");

        let err = PipelineError::SummarizeInFlight { user_id: 7 };
        assert!(err.to_string().contains("in flight"));
    }

    #[test]
    fn test_is_no_pending() {
        let err: Error = PipelineError::NoPendingMessages { user_id: 1 }.into();
        assert!(err.is_no_pending());

        let err: Error = PipelineError::SummarizeInFlight { user_id: 1 }.into();
        assert!(!err.is_no_pending());

        let err: Error = StorageError::Closed.into();
        assert!(!err.is_no_pending());
    }

    #[test]
    fn test_error_from_storage() {
        let storage_err = StorageError::Closed;
        let err: Error = storage_err.into();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_error_from_chunking() {
        let chunk_err = ChunkingError::InvalidConfig {
            reason: "zero".to_string(),
        };
        let err: Error = chunk_err.into();
        assert!(matches!(err, Error::Chunking(_)));
    }

    #[test]
    fn test_error_from_summarize() {
        let sum_err = SummarizeError::Backend("oom".to_string());
        let err: Error = sum_err.into();
        assert!(matches!(err, Error::Summarize(_)));
    }

    #[test]
    fn test_command_error_display() {
        let err = CommandError::ExecutionFailed("timeout".to_string());
        assert!(err.to_string().contains("timeout"));

        let err = CommandError::InvalidArgument("--bad".to_string());
        assert!(err.to_string().contains("invalid argument"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let rusqlite_err = rusqlite::Error::InvalidQuery;
        let err: Error = rusqlite_err.into();
        assert!(matches!(err, Error::Storage(StorageError::Database(_))));

        let rusqlite_err = rusqlite::Error::InvalidQuery;
        let err: StorageError = rusqlite_err.into();
        assert!(matches!(err, StorageError::Database(_)));
    }
}
