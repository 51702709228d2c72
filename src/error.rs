use thiserror::Error;

/// Failures reported by [`LinearAllocator`](crate::LinearAllocator).
///
/// Every failure is surfaced synchronously to the immediate caller as a
/// `Result`; the allocator never logs, retries, or degrades on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
  /// Zero size/capacity, or an alignment that is not a power of two.
  #[error("invalid argument: {reason}")]
  InvalidArgument {
    /// What was wrong with the request.
    reason: &'static str,
  },

  /// The OS refused the virtual memory reservation.
  #[error("out of memory: the OS could not reserve {requested} bytes")]
  OutOfMemory {
    /// Size of the mapping that was requested, in bytes.
    requested: usize,
  },

  /// The arena has too little space left for the alignment-adjusted request.
  #[error("capacity exceeded: need {requested} bytes, {available} available")]
  CapacityExceeded {
    /// Footprint of the request after alignment adjustment, padding included.
    requested: usize,
    /// Bytes still free between the cursor and the end of the arena.
    available: usize,
  },
}
