//! Session accumulator for condense-rs.
//!
//! Thin semantic wrapper over the fragment ledger, exposing the contract
//! the pipeline coordinator needs and decoupling it from storage
//! specifics.

use crate::core::UserId;
use crate::error::Result;
use crate::ledger::Ledger;
use std::sync::Arc;

/// Per-user message accumulator backed by a shared ledger.
///
/// A user's session is the set of fragments appended since the last
/// clear; its full text is the single-space join of those fragments in
/// insertion order. Cloning shares the underlying ledger handle.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use condense_rs::ledger::SqliteLedger;
/// use condense_rs::session::SessionAccumulator;
///
/// let ledger = Arc::new(SqliteLedger::in_memory().unwrap());
/// let sessions = SessionAccumulator::new(ledger);
///
/// sessions.add(1, "Hello!").unwrap();
/// sessions.add(1, "How are you?").unwrap();
/// assert_eq!(sessions.full_text(1).unwrap(), "Hello! How are you?");
/// ```
#[derive(Clone)]
pub struct SessionAccumulator {
    ledger: Arc<dyn Ledger>,
}

impl SessionAccumulator {
    /// Creates an accumulator over the given ledger.
    #[must_use]
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self { ledger }
    }

    /// Appends a message to the user's session.
    ///
    /// Once this returns, the fragment is durable and will be included in
    /// the next [`SessionAccumulator::full_text`] call for that user, even
    /// across a process restart.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable write fails.
    pub fn add(&self, user_id: UserId, text: &str) -> Result<()> {
        self.ledger.append(user_id, text)
    }

    /// Checks whether the user has any accumulated messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger query fails.
    pub fn has_pending(&self, user_id: UserId) -> Result<bool> {
        self.ledger.exists(user_id)
    }

    /// Returns the session's full text: fragments joined with single
    /// spaces in insertion order. An empty session yields the empty
    /// string.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger query fails.
    pub fn full_text(&self, user_id: UserId) -> Result<String> {
        Ok(self.ledger.read_all(user_id)?.join(" "))
    }

    /// Clears the user's session.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub fn clear(&self, user_id: UserId) -> Result<()> {
        self.ledger.clear(user_id)
    }
}
