//! Network Module
//!
//! The seam between the command core and the outside world.
//!
//! ## Architecture
//! - [`Endpoint`]: identity of a server endpoint
//! - [`Transport`]: moves one frame out and one frame back
//! - [`Dispatcher`]: one attempt of a command, with retry bookkeeping
//!
//! Endpoint selection, connection pooling and the retry loop itself live
//! outside this crate.

mod dispatch;
mod endpoint;
mod transport;

pub use dispatch::{Attempt, Dispatcher};
pub use endpoint::Endpoint;
pub use transport::{FramedStream, Transport};
