//! Executor abstraction.
//!
//! Walkers and the batch scheduler never touch a concrete thread pool; they
//! take an `Executor` by value and call one of its three methods, keeping any
//! specific threading model out of the cell kernel the same way
//! [`crate::alloc::Allocator`] keeps a specific allocation strategy out of it.
//! The default, [`SingleThread`], is a no-op that runs every body inline on
//! the calling thread — correct, if not fast.
//!
//! Implementations may back this with an OS thread pool, a fiber scheduler,
//! or (as here) nothing at all. None of the three methods may assume a
//! suspension point exists inside `body`; cancellation and scheduling only
//! ever happen at the executor boundary.

/// Maps an index range to per-index or per-chunk work, potentially in parallel.
pub trait Executor {
    /// Runs `body(i)` once for every `i` in `0..n`, in any order, possibly
    /// concurrently. Used for the embarrassingly-parallel cell updates within
    /// one diagonal.
    fn for_each(&self, n: usize, body: impl Fn(usize) + Sync);

    /// Runs `body(start, end)` once per contiguous chunk partitioning `0..n`,
    /// possibly concurrently. Used when a single call per cell is too fine
    /// grained, so each worker owns a contiguous span instead.
    fn for_each_range(&self, n: usize, body: impl Fn(usize, usize) + Sync);

    /// Runs `body(i)` for `i` in `0..n` under a dynamic work-stealing schedule.
    /// Used by the batch scheduler to hand one whole pair to one worker at a
    /// time.
    fn eager(&self, n: usize, body: impl Fn(usize) + Sync);
}

/// The default executor: every method runs `body` inline, in order.
///
/// This is the executor the façade uses when a caller does not supply one,
/// and the one the batch scheduler hands to each worker that owns exactly
/// one small pair.
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleThread;

impl Executor for SingleThread {
    fn for_each(&self, n: usize, body: impl Fn(usize) + Sync) {
        for i in 0..n {
            body(i);
        }
    }

    fn for_each_range(&self, n: usize, body: impl Fn(usize, usize) + Sync) {
        if n > 0 {
            body(0, n);
        }
    }

    fn eager(&self, n: usize, body: impl Fn(usize) + Sync) {
        for i in 0..n {
            body(i);
        }
    }
}
