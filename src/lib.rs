//! # riak-command
//!
//! The command-execution core of a Riak protocol-buffers client:
//! - Length-prefixed frame codec with message-code validation
//! - A polymorphic command contract with per-command retry bookkeeping
//! - A bounded command queue providing backpressure to submitters
//! - Encoding and decoding of CRDT map operations
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Callers (many threads)                      │
//! │            builders → Box<dyn Command>                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ enqueue (fails fast when full)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   CommandQueue                              │
//! │              (bounded, blocking dequeue)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ dequeue
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │             Dispatcher (one attempt at a time)              │
//! └──────┬──────────────────────┬───────────────────────┬───────┘
//!        │                      │                       │
//!        ▼                      ▼                       ▼
//!   ┌─────────┐          ┌─────────────┐         ┌─────────────┐
//!   │ Command │          │ Frame Codec │         │  Transport  │
//!   │ + Retry │          │  (protocol) │         │ (external)  │
//!   └─────────┘          └─────────────┘         └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod command;
pub mod queue;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RiakError, Result};
pub use config::ClientConfig;
pub use command::{Command, CommandHandle, Map, MapOperation};
pub use queue::CommandQueue;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of riak-command
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
