//! Error types for the command core
//!
//! Provides a unified error type for all recoverable conditions. Defects
//! (zero opcodes, exhausted retry counters, double queue teardown) are
//! panics, not values of this type.

use thiserror::Error;

/// Result type alias using RiakError
pub type Result<T> = std::result::Result<T, RiakError>;

/// Unified error type for command operations
#[derive(Debug, Error)]
pub enum RiakError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Unexpected response code: expected {expected}, got {actual}")]
    OpcodeMismatch { expected: u8, actual: u8 },

    #[error("Server error {code}: {message}")]
    Server { code: u32, message: String },

    #[error("[{command}] could not interpret response: {reason}")]
    UnexpectedResponse {
        command: &'static str,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Queue Errors
    // -------------------------------------------------------------------------
    #[error("Attempt to enqueue when queue is full (capacity {capacity})")]
    QueueFull { capacity: usize },

    #[error("Attempt to use a closed queue")]
    QueueClosed,
}

impl RiakError {
    /// Whether another attempt against the server could succeed.
    ///
    /// Configuration and closed-queue errors are permanent.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, RiakError::Config(_) | RiakError::QueueClosed)
    }
}
