//! Retry bookkeeping
//!
//! Per-command state shared by every command type: the remaining attempt
//! budget, the endpoint of the latest attempt and the command's outcome.

use std::sync::{Arc, Weak};

use crate::error::RiakError;
use crate::network::Endpoint;

/// Attempt budget and outcome of a single command
///
/// Only the failure of the final attempt is kept: errors reported while
/// budget remains are dropped, since intermediate failures are expected
/// during retry.
#[derive(Debug, Default)]
pub struct RetryState {
    remaining_tries: u8,

    /// Not owned; the endpoint may be gone by the time it is read back
    last_endpoint: Option<Weak<Endpoint>>,

    error: Option<RiakError>,

    success: bool,
}

impl RetryState {
    /// Create a state with no attempt budget
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_remaining_tries(&mut self, tries: u8) {
        self.remaining_tries = tries;
    }

    /// Consume one attempt
    ///
    /// Panics if the budget is already spent; callers must check
    /// [`has_remaining_tries`](Self::has_remaining_tries) first.
    pub fn decrement_remaining_tries(&mut self) {
        assert!(
            self.remaining_tries > 0,
            "decrement_remaining_tries called with no tries remaining"
        );
        self.remaining_tries -= 1;
        tracing::debug!(remaining_tries = self.remaining_tries, "consumed attempt");
    }

    pub fn has_remaining_tries(&self) -> bool {
        self.remaining_tries > 0
    }

    pub fn remaining_tries(&self) -> u8 {
        self.remaining_tries
    }

    /// Remember the endpoint of the current attempt
    pub fn set_last_endpoint(&mut self, endpoint: &Arc<Endpoint>) {
        self.last_endpoint = Some(Arc::downgrade(endpoint));
    }

    /// Endpoint of the latest attempt, if it is still alive
    pub fn last_endpoint(&self) -> Option<Arc<Endpoint>> {
        self.last_endpoint.as_ref().and_then(Weak::upgrade)
    }

    /// Record a failed attempt
    ///
    /// The error is stored only when no attempts remain.
    pub fn record_failure(&mut self, err: RiakError) {
        self.success = false;
        if self.has_remaining_tries() {
            tracing::debug!(error = %err, "discarding error, tries remain");
        } else {
            self.error = Some(err);
        }
    }

    /// Record a successfully interpreted response
    pub fn record_success(&mut self) {
        self.success = true;
        self.error = None;
    }

    pub fn successful(&self) -> bool {
        self.success
    }

    /// Terminal error, set once the budget is exhausted
    pub fn error(&self) -> Option<&RiakError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<RiakError> {
        self.error.take()
    }
}
