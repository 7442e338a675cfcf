//! The batch scheduler: scores N aligned pairs, splitting work between
//! one-worker-per-pair dispatch (small pairs) and full-executor cooperation
//! on a single pair at a time (large pairs), with atomic first-error
//! short-circuiting.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

use crate::alloc::Allocator;
use crate::error::{Error, Result};
use crate::executor::{Executor, SingleThread};
use crate::similarity::cost::Substitution;
use crate::similarity::estimate::estimate;
use crate::similarity::facade::{order_by_length, run_similarity};
use crate::similarity::{GapCost, Locality, Objective};

/// Pairs whose estimated footprint is at or above this many bytes run
/// sequentially with the full executor cooperating inside the walker; below
/// it, pairs are dispatched one-per-worker. A conservative stand-in for
/// "fits in L1" since the actual cache size is not knowable at this layer.
const L1_THRESHOLD_BYTES: usize = 32 * 1024;

const DEFAULT_REGISTER_WIDTH: usize = 32;

/// Scores every `(pairs_a[i], pairs_b[i])` pair, writing `out[i]`.
///
/// `pairs_a` and `pairs_b` must have equal length, matching `out` (checked
/// only in debug builds). On the first allocator failure, subsequent pairs
/// are skipped and that failure is returned; pairs already written before
/// the failure keep their results.
#[allow(clippy::too_many_arguments)]
pub fn score_pairs(
    pairs_a: &[&[u8]],
    pairs_b: &[&[u8]],
    substitution: &dyn Substitution,
    gap: GapCost,
    objective: Objective,
    locality: Locality,
    allocator: &dyn Allocator,
    executor: &dyn Executor,
    out: &mut [i64],
) -> Result<()> {
    debug_assert_eq!(pairs_a.len(), pairs_b.len(), "batch scheduler requires equal-count input sequences");
    debug_assert_eq!(pairs_a.len(), out.len(), "output slice must have one slot per pair");

    let n = pairs_a.len().min(pairs_b.len()).min(out.len());
    let affine = gap.as_linear().is_none();
    let signed = objective == Objective::MaximizeScore;

    let (small, large): (Vec<usize>, Vec<usize>) = (0..n).partition(|&i| {
        let req = estimate(
            pairs_a[i].len(),
            pairs_b[i].len(),
            affine,
            substitution.magnitude(),
            gap.magnitude(),
            signed,
            1,
            DEFAULT_REGISTER_WIDTH,
        );
        req.total_bytes < L1_THRESHOLD_BYTES
    });

    let results: Vec<AtomicI64> = (0..n).map(|_| AtomicI64::new(0)).collect();
    let failed = AtomicBool::new(false);
    let first_error: Mutex<Option<Error>> = Mutex::new(None);

    let publish_failure = |err: Error| {
        if !failed.swap(true, Ordering::SeqCst) {
            *first_error.lock().unwrap() = Some(err);
        }
    };

    // Small pairs: one-per-worker, dynamically scheduled, single-threaded inside.
    executor.eager(small.len(), |k| {
        if failed.load(Ordering::Relaxed) {
            return;
        }
        let i = small[k];
        let (shorter, longer) = order_by_length(pairs_a[i], pairs_b[i]);
        match run_similarity(shorter, longer, substitution, gap, objective, locality, allocator, &SingleThread) {
            Ok(score) => results[i].store(score, Ordering::Relaxed),
            Err(err) => publish_failure(err),
        }
    });

    // Large pairs: run sequentially, but let the whole executor cooperate
    // inside each one.
    for i in large {
        if failed.load(Ordering::Relaxed) {
            break;
        }
        let (shorter, longer) = order_by_length(pairs_a[i], pairs_b[i]);
        match run_similarity(shorter, longer, substitution, gap, objective, locality, allocator, executor) {
            Ok(score) => results[i].store(score, Ordering::Relaxed),
            Err(err) => {
                publish_failure(err);
                break;
            }
        }
    }

    for (i, slot) in out.iter_mut().enumerate().take(n) {
        *slot = results[i].load(Ordering::Relaxed);
    }

    if failed.load(Ordering::Relaxed) {
        return Err(first_error.lock().unwrap().unwrap_or(Error::OutOfMemory { requested_bytes: 0 }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::ProcessAllocator;
    use crate::similarity::cost::UniformCost;

    #[test]
    fn scores_every_pair() {
        let a: Vec<&[u8]> = vec![b"kitten", b"flaw", b""];
        let b: Vec<&[u8]> = vec![b"sitting", b"lawn", b"abc"];
        let mut out = vec![0i64; 3];
        let subs = UniformCost::levenshtein();
        score_pairs(
            &a,
            &b,
            &subs,
            GapCost::Linear(1),
            Objective::MinimizeDistance,
            Locality::Global,
            &ProcessAllocator,
            &SingleThread,
            &mut out,
        )
        .unwrap();
        assert_eq!(out, vec![3, 2, 3]);
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let a: Vec<&[u8]> = vec![];
        let b: Vec<&[u8]> = vec![];
        let mut out: Vec<i64> = vec![];
        let subs = UniformCost::levenshtein();
        score_pairs(
            &a,
            &b,
            &subs,
            GapCost::Linear(1),
            Objective::MinimizeDistance,
            Locality::Global,
            &ProcessAllocator,
            &SingleThread,
            &mut out,
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn large_pair_uses_sequential_path() {
        // Construct one pair whose footprint exceeds the L1 threshold so it
        // is routed through the "large" path instead of `eager`.
        let long_a = vec![b'a'; 10_000];
        let long_b = vec![b'b'; 10_000];
        let a: Vec<&[u8]> = vec![&long_a];
        let b: Vec<&[u8]> = vec![&long_b];
        let mut out = vec![0i64; 1];
        let subs = UniformCost::levenshtein();
        score_pairs(
            &a,
            &b,
            &subs,
            GapCost::Linear(1),
            Objective::MinimizeDistance,
            Locality::Global,
            &ProcessAllocator,
            &SingleThread,
            &mut out,
        )
        .unwrap();
        assert_eq!(out[0], 10_000);
    }
}
