//! Pipeline coordinator for condense-rs.
//!
//! Glues the session accumulator and the summarization merge driver: on a
//! summarize request, reads the full accumulated text, runs it through
//! chunking and merge, and clears the accumulator only after a summary has
//! been produced.

use crate::core::UserId;
use crate::error::{Error, PipelineError, Result};
use crate::session::SessionAccumulator;
use crate::summarize::{Summarizer, merge_summarize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

/// Coordinates summarize requests across users.
///
/// At most one summarize execution runs per user at a time; a second
/// request for the same user while one is in flight is rejected with
/// [`PipelineError::SummarizeInFlight`]. Requests for distinct users
/// proceed concurrently: the in-flight set's lock is held only to insert
/// or remove an id, never while the capability executes.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use condense_rs::ledger::SqliteLedger;
/// use condense_rs::pipeline::Coordinator;
/// use condense_rs::session::SessionAccumulator;
/// use condense_rs::summarize::ExtractiveSummarizer;
///
/// let sessions = SessionAccumulator::new(Arc::new(SqliteLedger::in_memory().unwrap()));
/// let coordinator =
///     Coordinator::new(sessions.clone(), Arc::new(ExtractiveSummarizer::new(150)), 500).unwrap();
///
/// sessions.add(1, "Hello!").unwrap();
/// let summary = coordinator.request_summarize(1).unwrap();
/// assert_eq!(summary, "Hello!");
/// assert!(!sessions.has_pending(1).unwrap());
/// ```
pub struct Coordinator {
    sessions: SessionAccumulator,
    summarizer: Arc<dyn Summarizer>,
    max_input_length: usize,
    in_flight: Mutex<HashSet<UserId>>,
}

impl Coordinator {
    /// Creates a coordinator.
    ///
    /// # Arguments
    ///
    /// * `sessions` - The accumulator to read and clear.
    /// * `summarizer` - The injected inference capability.
    /// * `max_input_length` - Block size budget in characters. Must be > 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `max_input_length` is zero.
    pub fn new(
        sessions: SessionAccumulator,
        summarizer: Arc<dyn Summarizer>,
        max_input_length: usize,
    ) -> Result<Self> {
        if max_input_length == 0 {
            return Err(Error::Config {
                message: "max_input_length must be > 0".to_string(),
            });
        }
        Ok(Self {
            sessions,
            summarizer,
            max_input_length,
            in_flight: Mutex::new(HashSet::new()),
        })
    }

    /// Produces a summary of everything accumulated for the user, then
    /// clears the session.
    ///
    /// The session is cleared only after the summary value has been
    /// obtained: any failure from chunking or the capability leaves the
    /// accumulated messages untouched and available for retry.
    ///
    /// # Errors
    ///
    /// * [`PipelineError::NoPendingMessages`] if the session is empty —
    ///   check with [`Error::is_no_pending`].
    /// * [`PipelineError::SummarizeInFlight`] if a summarize call for this
    ///   user is already executing.
    /// * [`crate::error::SummarizeError::BlockFailed`] if the capability
    ///   fails for any block; the session is left unchanged.
    /// * [`crate::error::StorageError`] if the ledger fails.
    pub fn request_summarize(&self, user_id: UserId) -> Result<String> {
        let _guard = self.begin(user_id)?;

        if !self.sessions.has_pending(user_id)? {
            return Err(PipelineError::NoPendingMessages { user_id }.into());
        }

        let full_text = self.sessions.full_text(user_id)?;
        info!(user_id, bytes = full_text.len(), "summarize started");

        let summary = match merge_summarize(&full_text, self.max_input_length, &*self.summarizer) {
            Ok(summary) => summary,
            Err(e) => {
                warn!(user_id, error = %e, "summarize failed, session preserved");
                return Err(e);
            }
        };

        // Clear only now that the summary exists; a failure here keeps the
        // fragments so a retry can reproduce the summary.
        self.sessions.clear(user_id)?;
        info!(user_id, bytes = summary.len(), "summarize finished");

        Ok(summary)
    }

    /// Marks a user's summarize as in flight, rejecting duplicates.
    fn begin(&self, user_id: UserId) -> Result<InFlightGuard<'_>> {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(user_id) {
            return Err(PipelineError::SummarizeInFlight { user_id }.into());
        }
        Ok(InFlightGuard {
            set: &self.in_flight,
            user_id,
        })
    }
}

/// Removes the in-flight marker on every exit path.
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<UserId>>,
    user_id: UserId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.user_id);
    }
}
