//! Rolling DP storage backed by one allocation.
//!
//! A walker needs a handful of rolling buffers (rows or diagonals) that are
//! logically swapped each step but should never be reallocated or copied.
//! `Scratch<C>` draws a single byte buffer from an injected
//! [`crate::alloc::Allocator`] up front, carves it into fixed-size slots, and
//! lets the caller address any slot by index — rotation becomes "which slot
//! index means *current* now", not a new allocation or a memmove.

use std::marker::PhantomData;

use crate::alloc::Allocator;
use crate::error::Result;
use crate::similarity::Cell;

pub(crate) struct Scratch<C> {
    bytes: Vec<u8>,
    slot_len: usize,
    _cell: PhantomData<C>,
}

impl<C: Cell> Scratch<C> {
    /// Allocates `slots * slot_len` cells worth of storage, zero-initialized.
    pub(crate) fn new(allocator: &dyn Allocator, slots: usize, slot_len: usize) -> Result<Self> {
        let bytes = allocator.allocate(slots * slot_len * C::BYTES)?;
        Ok(Scratch {
            bytes,
            slot_len,
            _cell: PhantomData,
        })
    }

    #[inline]
    fn offset(&self, slot: usize, index: usize) -> usize {
        (slot * self.slot_len + index) * C::BYTES
    }

    #[inline]
    pub(crate) fn get(&self, slot: usize, index: usize) -> C {
        let offset = self.offset(slot, index);
        C::read_ne_bytes(&self.bytes[offset..offset + C::BYTES])
    }

    #[inline]
    pub(crate) fn set(&mut self, slot: usize, index: usize, value: C) {
        let offset = self.offset(slot, index);
        value.write_ne_bytes(&mut self.bytes[offset..offset + C::BYTES]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::ProcessAllocator;

    #[test]
    fn round_trips_values_per_slot() {
        let mut scratch = Scratch::<u32>::new(&ProcessAllocator, 3, 4).unwrap();
        scratch.set(0, 0, 7);
        scratch.set(1, 0, 9);
        scratch.set(2, 3, 42);
        assert_eq!(scratch.get(0, 0), 7);
        assert_eq!(scratch.get(1, 0), 9);
        assert_eq!(scratch.get(2, 3), 42);
    }

    #[test]
    fn starts_zeroed() {
        let scratch = Scratch::<i16>::new(&ProcessAllocator, 2, 5).unwrap();
        assert_eq!(scratch.get(1, 4), 0);
    }

    #[test]
    fn slots_do_not_alias() {
        let mut scratch = Scratch::<u8>::new(&ProcessAllocator, 2, 2).unwrap();
        scratch.set(0, 1, 5);
        assert_eq!(scratch.get(1, 1), 0);
    }
}
