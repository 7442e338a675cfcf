//! The diagonal walker: anti-diagonal traversal using three rolling
//! diagonals for linear gaps, or seven for affine (three for the primary
//! score plus a two-way rotation each for the running insertion and
//! deletion arrays).
//!
//! Cells are addressed by `(d, i)` where `d = i + j` is the anti-diagonal
//! index and `i` is the row. A diagonal's populated row range is
//! `lo(d)..=hi(d)` with `lo(d) = max(0, d - n)` and `hi(d) = min(m, d)`
//! (`m` = shorter length, `n` = longer length). The boundary test
//! `i == 0 || j == 0` is phase-agnostic, so this walker never special-cases
//! a growing/plateau/shrinking phase; it falls out of the row-range formula
//! on every step.
//!
//! All rolling state is allocated once per call, through the caller's
//! [`crate::alloc::Allocator`], and addressed by slot index (`d % 3`, or
//! `d % 2` for the two-way gap arrays) rather than reallocated or copied
//! each diagonal.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::alloc::Allocator;
use crate::error::Result;
use crate::executor::Executor;
use crate::similarity::cost::Substitution;
use crate::similarity::kernel::{score_cell_affine, score_cell_linear, Extremum};
use crate::similarity::scratch::Scratch;
use crate::similarity::{Cell, Locality, Objective};

#[inline]
fn row_range(d: usize, m: usize, n: usize) -> (usize, usize) {
    let lo = d.saturating_sub(n);
    let hi = d.min(m);
    (lo, hi)
}

/// Splits `lo..=hi` for anti-diagonal `d` into its (at most two) boundary rows
/// and the interior range the kernel actually computes.
fn interior_range(d: usize, lo: usize, hi: usize) -> (usize, usize) {
    let interior_lo = if lo == 0 { 1 } else { lo };
    let interior_hi = if hi == d && hi > 0 { hi - 1 } else { hi };
    (interior_lo, interior_hi)
}

/// Runs the diagonal walker for a linear gap cost. `shorter.len() <= longer.len()`
/// must already hold; the façade performs that ordering.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_linear<C: Cell>(
    shorter: &[u8],
    longer: &[u8],
    substitution: &dyn Substitution,
    gap: i8,
    objective: Objective,
    locality: Locality,
    allocator: &dyn Allocator,
    executor: &dyn Executor,
) -> Result<i64> {
    let m = shorter.len();
    let n = longer.len();
    let max_len = m + 1;

    let floor = match locality {
        Locality::Local => Some(C::ZERO),
        Locality::Global => None,
    };
    let initial_extremum = match locality {
        Locality::Local => 0,
        Locality::Global => match objective {
            Objective::MinimizeDistance => i64::MAX,
            Objective::MaximizeScore => i64::MIN,
        },
    };
    let extremum = Extremum::new(objective, initial_extremum);

    // Three rolling diagonals (current, one step back, two steps back), one
    // allocation, rotated by `d % 3`.
    let mut diagonals: Scratch<C> = Scratch::new(allocator, 3, max_len)?;
    let mut lo_of = [0usize; 3];

    // Landing zone for one diagonal's interior cells, reused across every
    // step. A `Fn + Sync` executor body cannot mutate a captured `Vec`
    // directly, so parallel writes land here via `&self`-only atomics and
    // are copied into `diagonals` sequentially once the executor call
    // returns.
    let compute: Vec<AtomicI64> = (0..max_len).map(|_| AtomicI64::new(0)).collect();

    for d in 0..=(m + n) {
        let (lo, hi) = row_range(d, m, n);
        let slot = d % 3;
        lo_of[slot] = lo;

        for i in lo..=hi {
            let j = d - i;
            if i == 0 || j == 0 {
                let boundary = d as i64 * gap as i64;
                let cell = match floor {
                    Some(f) => C::from_i64(objective.opt(f.to_i64(), boundary)),
                    None => C::from_i64(boundary),
                };
                diagonals.set(slot, i - lo, cell);
                extremum.update(cell.to_i64());
            }
        }

        let (interior_lo, interior_hi) = interior_range(d, lo, hi);
        if interior_lo <= interior_hi && d >= 2 {
            let len = interior_hi - interior_lo + 1;
            let prev1_slot = (slot + 2) % 3;
            let prev2_slot = (slot + 1) % 3;
            let prev1_lo = lo_of[prev1_slot];
            let prev2_lo = lo_of[prev2_slot];

            executor.for_each_range(len, |start, end| {
                for k in start..end {
                    let i = interior_lo + k;
                    let j = d - i;
                    let cell = score_cell_linear(
                        shorter[i - 1],
                        longer[j - 1],
                        diagonals.get(prev2_slot, (i - 1) - prev2_lo),
                        diagonals.get(prev1_slot, i - prev1_lo),
                        diagonals.get(prev1_slot, (i - 1) - prev1_lo),
                        substitution,
                        gap,
                        objective,
                        floor,
                    );
                    compute[k].store(cell.to_i64(), Ordering::Relaxed);
                }
            });
            for k in 0..len {
                let i = interior_lo + k;
                let cell = C::from_i64(compute[k].load(Ordering::Relaxed));
                diagonals.set(slot, i - lo, cell);
                extremum.update(cell.to_i64());
            }
        }
    }

    let result = match locality {
        Locality::Global => {
            let final_slot = (m + n) % 3;
            diagonals.get(final_slot, m - lo_of[final_slot]).to_i64()
        }
        Locality::Local => extremum.get(),
    };
    Ok(result)
}

/// Runs the diagonal walker for an affine gap cost.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_affine<C: Cell>(
    shorter: &[u8],
    longer: &[u8],
    substitution: &dyn Substitution,
    open: i8,
    extend: i8,
    objective: Objective,
    locality: Locality,
    allocator: &dyn Allocator,
    executor: &dyn Executor,
) -> Result<i64> {
    let m = shorter.len();
    let n = longer.len();
    let max_len = m + 1;

    let floor = match locality {
        Locality::Local => Some(C::ZERO),
        Locality::Global => None,
    };
    let initial_extremum = match locality {
        Locality::Local => 0,
        Locality::Global => match objective {
            Objective::MinimizeDistance => i64::MAX,
            Objective::MaximizeScore => i64::MIN,
        },
    };
    let extremum = Extremum::new(objective, initial_extremum);

    let primary_boundary = |d: usize| -> i64 {
        match locality {
            Locality::Local => 0,
            Locality::Global => {
                if d == 0 {
                    0
                } else {
                    open as i64 + extend as i64 * (d as i64 - 1)
                }
            }
        }
    };
    // One step worse than the primary boundary, so a running gap can never
    // win a comparison against a freshly-opened one at the edge of the matrix.
    let running_boundary = |d: usize| -> i64 { primary_boundary(d) + open as i64 + extend as i64 };

    let mut primary: Scratch<C> = Scratch::new(allocator, 3, max_len)?;
    let mut ins: Scratch<C> = Scratch::new(allocator, 2, max_len)?;
    let mut del: Scratch<C> = Scratch::new(allocator, 2, max_len)?;
    let mut primary_lo = [0usize; 3];
    let mut gap_lo = [0usize; 2];

    let compute_primary: Vec<AtomicI64> = (0..max_len).map(|_| AtomicI64::new(0)).collect();
    let compute_ins: Vec<AtomicI64> = (0..max_len).map(|_| AtomicI64::new(0)).collect();
    let compute_del: Vec<AtomicI64> = (0..max_len).map(|_| AtomicI64::new(0)).collect();

    for d in 0..=(m + n) {
        let (lo, hi) = row_range(d, m, n);
        let primary_slot = d % 3;
        let gap_slot = d % 2;
        primary_lo[primary_slot] = lo;
        gap_lo[gap_slot] = lo;

        for i in lo..=hi {
            let j = d - i;
            if i == 0 || j == 0 {
                let cell = C::from_i64(primary_boundary(d));
                primary.set(primary_slot, i - lo, cell);
                ins.set(gap_slot, i - lo, C::from_i64(running_boundary(d)));
                del.set(gap_slot, i - lo, C::from_i64(running_boundary(d)));
                extremum.update(cell.to_i64());
            }
        }

        let (interior_lo, interior_hi) = interior_range(d, lo, hi);
        if interior_lo <= interior_hi && d >= 2 {
            let len = interior_hi - interior_lo + 1;
            let primary_prev1_slot = (primary_slot + 2) % 3;
            let primary_prev2_slot = (primary_slot + 1) % 3;
            let gap_prev1_slot = (gap_slot + 1) % 2;
            let primary_prev1_lo = primary_lo[primary_prev1_slot];
            let primary_prev2_lo = primary_lo[primary_prev2_slot];
            let gap_prev1_lo = gap_lo[gap_prev1_slot];

            executor.for_each_range(len, |start, end| {
                for k in start..end {
                    let i = interior_lo + k;
                    let j = d - i;
                    let (cell, new_ins, new_del) = score_cell_affine(
                        shorter[i - 1],
                        longer[j - 1],
                        primary.get(primary_prev2_slot, (i - 1) - primary_prev2_lo),
                        primary.get(primary_prev1_slot, i - primary_prev1_lo),
                        primary.get(primary_prev1_slot, (i - 1) - primary_prev1_lo),
                        ins.get(gap_prev1_slot, i - gap_prev1_lo),
                        del.get(gap_prev1_slot, (i - 1) - gap_prev1_lo),
                        substitution,
                        open,
                        extend,
                        objective,
                        floor,
                    );
                    compute_primary[k].store(cell.to_i64(), Ordering::Relaxed);
                    compute_ins[k].store(new_ins.to_i64(), Ordering::Relaxed);
                    compute_del[k].store(new_del.to_i64(), Ordering::Relaxed);
                }
            });
            for k in 0..len {
                let i = interior_lo + k;
                primary.set(primary_slot, i - lo, C::from_i64(compute_primary[k].load(Ordering::Relaxed)));
                ins.set(gap_slot, i - lo, C::from_i64(compute_ins[k].load(Ordering::Relaxed)));
                del.set(gap_slot, i - lo, C::from_i64(compute_del[k].load(Ordering::Relaxed)));
            }
        }
    }

    let result = match locality {
        Locality::Global => {
            let final_slot = (m + n) % 3;
            primary.get(final_slot, m - primary_lo[final_slot]).to_i64()
        }
        Locality::Local => extremum.get(),
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::ProcessAllocator;
    use crate::executor::SingleThread;
    use crate::similarity::cost::UniformCost;

    #[test]
    fn linear_global_minimize_matches_kitten_sitting() {
        let subs = UniformCost::levenshtein();
        let result = run_linear::<u32>(
            b"kitten",
            b"sitting",
            &subs,
            1,
            Objective::MinimizeDistance,
            Locality::Global,
            &ProcessAllocator,
            &SingleThread,
        )
        .unwrap();
        assert_eq!(result, 3);
    }

    #[test]
    fn linear_global_identity_is_zero() {
        let subs = UniformCost::levenshtein();
        let result = run_linear::<u32>(
            b"abcdef",
            b"abcdef",
            &subs,
            1,
            Objective::MinimizeDistance,
            Locality::Global,
            &ProcessAllocator,
            &SingleThread,
        )
        .unwrap();
        assert_eq!(result, 0);
    }

    #[test]
    fn linear_empty_vs_nonempty() {
        let subs = UniformCost::levenshtein();
        let result = run_linear::<u32>(
            b"",
            b"abc",
            &subs,
            1,
            Objective::MinimizeDistance,
            Locality::Global,
            &ProcessAllocator,
            &SingleThread,
        )
        .unwrap();
        assert_eq!(result, 3);
    }

    #[test]
    fn affine_smith_waterman_local_match() {
        let subs = crate::similarity::cost::CostTable::diagonal(1, -1);
        let result = run_affine::<i64>(
            b"AGCT",
            b"XXAGCTYY",
            &subs,
            -2,
            -2,
            Objective::MaximizeScore,
            Locality::Local,
            &ProcessAllocator,
            &SingleThread,
        )
        .unwrap();
        assert_eq!(result, 4);
    }
}
