//! Error types for buffer construction.

use thiserror::Error;

/// The capacity bound passed to [`TailBuffer::new`](crate::TailBuffer::new)
/// must admit at least one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("capacity must be at least 1")]
pub struct CapacityError;
