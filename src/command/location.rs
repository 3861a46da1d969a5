//! Shared builder helpers: object location checks and option conversion.

use std::time::Duration;

use crate::error::{Result, RiakError};

/// Bucket type used when a builder is not given one
pub(crate) const DEFAULT_BUCKET_TYPE: &str = "default";

/// Reject an empty required field
pub(crate) fn require(builder: &str, field: &str, value: &[u8]) -> Result<()> {
    if value.is_empty() {
        return Err(RiakError::Config(format!(
            "{} requires a non-empty {}",
            builder, field
        )));
    }
    Ok(())
}

/// Fill in the default bucket type when none was set
pub(crate) fn default_bucket_type(bucket_type: &mut Vec<u8>) {
    if bucket_type.is_empty() {
        bucket_type.extend_from_slice(DEFAULT_BUCKET_TYPE.as_bytes());
    }
}

/// Server timeouts are carried as whole milliseconds
pub(crate) fn timeout_ms(timeout: Duration) -> u32 {
    timeout.as_millis().min(u32::MAX as u128) as u32
}

pub(crate) fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
