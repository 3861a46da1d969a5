//! Single-attempt dispatch
//!
//! Drives one attempt of a command against one endpoint and applies the
//! retry bookkeeping. Choosing the endpoint and deciding whether to loop
//! are left to the caller; [`Attempt`] tells it whether another try is
//! allowed and [`RetryState::last_endpoint`](crate::command::RetryState::last_endpoint)
//! tells it where the previous one went.

use std::sync::Arc;

use super::{Endpoint, Transport};
use crate::command::{build_request_frame, handle_response_frame, Command};
use crate::config::ClientConfig;
use crate::error::Result;

/// Outcome of a single attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// The response was interpreted; the command is successful
    Completed,

    /// The attempt failed and budget remains
    Retry,

    /// The attempt failed and no budget remains; the command holds the error
    Exhausted,
}

/// Applies the configured attempt budget and runs attempts
#[derive(Debug, Clone)]
pub struct Dispatcher {
    max_tries: u8,
}

impl Dispatcher {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            max_tries: config.max_tries,
        }
    }

    /// Seed a fresh command with the configured attempt budget
    pub fn prepare(&self, cmd: &mut dyn Command) {
        cmd.retry_state_mut().set_remaining_tries(self.max_tries);
    }

    /// Run one attempt of `cmd` against `endpoint`
    ///
    /// Panics if the command has no attempts left.
    pub fn attempt<T>(
        &self,
        cmd: &mut dyn Command,
        endpoint: &Arc<Endpoint>,
        transport: &mut T,
    ) -> Attempt
    where
        T: Transport + ?Sized,
    {
        let state = cmd.retry_state_mut();
        state.decrement_remaining_tries();
        state.set_last_endpoint(endpoint);

        match exchange(cmd, transport) {
            Ok(()) => {
                tracing::debug!(command = cmd.name(), endpoint = %endpoint, "command completed");
                Attempt::Completed
            }
            Err(err) => {
                tracing::warn!(command = cmd.name(), endpoint = %endpoint, error = %err, "attempt failed");
                cmd.on_failure(err);

                if cmd.retry_state().has_remaining_tries() {
                    Attempt::Retry
                } else {
                    Attempt::Exhausted
                }
            }
        }
    }
}

fn exchange<T>(cmd: &mut dyn Command, transport: &mut T) -> Result<()>
where
    T: Transport + ?Sized,
{
    let request = build_request_frame(cmd)?;
    let response = transport.round_trip(&request)?;
    handle_response_frame(cmd, &response)
}
