//! Command Queue
//!
//! Bounded FIFO of pending commands between submitting threads and the
//! dispatcher.
//!
//! ## Semantics
//! - `enqueue` never blocks: it fails with [`RiakError::QueueFull`] at capacity
//! - `dequeue` blocks until an item arrives or the queue is destroyed
//! - After `destroy`, remaining items are still drained in order before
//!   `dequeue` reports [`RiakError::QueueClosed`]
//!
//! ## State Machine
//! ```text
//! Open ──destroy──▶ Closed
//! ```
//! There is no way back to Open.

use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use parking_lot::Mutex;

use crate::command::CommandHandle;
use crate::config::ClientConfig;
use crate::error::{Result, RiakError};

/// Bounded, thread-safe queue of pending commands
///
/// Backed by a bounded crossbeam channel. The queue owns the only sender, so
/// dropping it in [`destroy`](Self::destroy) disconnects the channel and
/// wakes every blocked consumer once the buffer is drained.
pub struct CommandQueue<T = CommandHandle> {
    capacity: usize,

    /// `None` once destroyed
    sender: Mutex<Option<Sender<T>>>,

    receiver: Receiver<T>,
}

impl<T> CommandQueue<T> {
    /// Create an open queue holding at most `capacity` items
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: u16) -> Self {
        assert!(capacity > 0, "command queue capacity must be non-zero");

        let capacity = capacity as usize;
        let (sender, receiver) = channel::bounded(capacity);
        Self {
            capacity,
            sender: Mutex::new(Some(sender)),
            receiver,
        }
    }

    /// Append an item without blocking
    pub fn enqueue(&self, item: T) -> Result<()> {
        let guard = self.sender.lock();
        let sender = guard.as_ref().ok_or(RiakError::QueueClosed)?;

        match sender.try_send(item) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                tracing::debug!(capacity = self.capacity, "command queue full");
                Err(RiakError::QueueFull {
                    capacity: self.capacity,
                })
            }
            // The queue keeps its own receiver, so this cannot happen while open
            Err(TrySendError::Disconnected(_)) => Err(RiakError::QueueClosed),
        }
    }

    /// Remove the oldest item, blocking until one is available
    pub fn dequeue(&self) -> Result<T> {
        self.receiver.recv().map_err(|_| RiakError::QueueClosed)
    }

    /// Remove the oldest item if one is immediately available
    pub fn try_dequeue(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_closed(&self) -> bool {
        self.sender.lock().is_none()
    }

    /// Close the queue
    ///
    /// Panics if the queue was already destroyed.
    pub fn destroy(&self) {
        let sender = self.sender.lock().take();
        assert!(sender.is_some(), "command queue destroyed twice");
        tracing::debug!(pending = self.receiver.len(), "command queue destroyed");
    }
}

impl CommandQueue<CommandHandle> {
    /// Create a command queue sized by `config.queue_capacity`
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.queue_capacity)
    }
}
