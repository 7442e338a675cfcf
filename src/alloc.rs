//! Allocator abstraction.
//!
//! Every top-level similarity call takes an allocator by value, a small trait
//! object callers can swap for a fixed-arena or fallible allocator. The
//! default, [`ProcessAllocator`], goes through the global allocator via
//! `Vec::try_reserve_exact`, which is how this crate surfaces out-of-memory as
//! a [`crate::error::Error::OutOfMemory`] instead of aborting.

use crate::error::Error;

/// A scratch-buffer source for one top-level similarity call.
///
/// Buffers returned by `allocate` are zero-filled and exactly `bytes` long.
/// Implementations are not required to be thread-safe beyond `&self`; the
/// batch scheduler (component H) only ever calls `allocate` from the thread
/// that owns a given pair.
pub trait Allocator {
    /// Allocates a zeroed buffer of exactly `bytes` bytes, or reports OOM.
    fn allocate(&self, bytes: usize) -> Result<Vec<u8>, Error>;
}

/// The default allocator: the process's global allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessAllocator;

impl Allocator for ProcessAllocator {
    fn allocate(&self, bytes: usize) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(bytes)
            .map_err(|_| Error::OutOfMemory { requested_bytes: bytes })?;
        buf.resize(bytes, 0);
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_allocator_zero_fills() {
        let buf = ProcessAllocator.allocate(64).unwrap();
        assert_eq!(buf.len(), 64);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn process_allocator_zero_length() {
        let buf = ProcessAllocator.allocate(0).unwrap();
        assert!(buf.is_empty());
    }
}
