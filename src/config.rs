//! Configuration for the command core
//!
//! Centralized configuration with sensible defaults.

use crate::error::{Result, RiakError};

/// Default capacity of the command queue
pub const DEFAULT_QUEUE_CAPACITY: u16 = 1024;

/// Default number of attempts per command
pub const DEFAULT_MAX_TRIES: u8 = 3;

/// Default upper bound on a frame's length prefix (16 MB)
pub const DEFAULT_MAX_FRAME_SIZE: u32 = 16 * 1024 * 1024;

/// Main configuration for the command core
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Queue Configuration
    // -------------------------------------------------------------------------
    /// Max number of pending commands before enqueue fails
    pub queue_capacity: u16,

    // -------------------------------------------------------------------------
    // Retry Configuration
    // -------------------------------------------------------------------------
    /// Attempt budget given to every command before its first attempt
    pub max_tries: u8,

    // -------------------------------------------------------------------------
    // Framing Configuration
    // -------------------------------------------------------------------------
    /// Largest length prefix accepted when reading a frame from a stream
    pub max_frame_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_tries: DEFAULT_MAX_TRIES,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Reject values that would make the queue or dispatcher unusable
    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(RiakError::Config(
                "queue_capacity must be greater than zero".to_string(),
            ));
        }
        if self.max_tries == 0 {
            return Err(RiakError::Config(
                "max_tries must be greater than zero".to_string(),
            ));
        }
        if self.max_frame_size == 0 {
            return Err(RiakError::Config(
                "max_frame_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the command queue capacity
    pub fn queue_capacity(mut self, capacity: u16) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    /// Set the number of attempts per command
    pub fn max_tries(mut self, tries: u8) -> Self {
        self.config.max_tries = tries;
        self
    }

    /// Set the maximum accepted frame length (in bytes)
    pub fn max_frame_size(mut self, size: u32) -> Self {
        self.config.max_frame_size = size;
        self
    }

    /// Validate and return the config
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
