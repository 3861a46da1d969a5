//! Endpoint identity
//!
//! A server endpoint as seen by the command core. Connection management
//! lives outside this crate; commands only remember which endpoint they
//! were last attempted against.

use std::fmt;

/// A server endpoint, identified by its address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    addr: String,
}

impl Endpoint {
    /// Create an endpoint for `addr` (host:port)
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    /// The endpoint address
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.addr)
    }
}
