//! The cell kernel: the per-cell DP recurrence shared by both walkers.
//!
//! Both the diagonal walker and the row walker drive the exact same formula
//! per cell; this module owns that formula and nothing else. It never
//! computes an offset into a diagonal or a row — that alignment bookkeeping
//! is the walker's job, so the kernel stays oblivious to whether it is being
//! driven diagonally or row by row.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::similarity::cost::Substitution;
use crate::similarity::{add, Cell, Objective};

/// A running local-alignment extremum, updated from possibly-parallel cell
/// writes via a compare-exchange loop rather than a lock.
pub(crate) struct Extremum {
    value: AtomicI64,
    objective: Objective,
}

impl Extremum {
    pub(crate) fn new(objective: Objective, initial: i64) -> Self {
        Extremum {
            value: AtomicI64::new(initial),
            objective,
        }
    }

    pub(crate) fn update(&self, candidate: i64) {
        let mut current = self.value.load(Ordering::Relaxed);
        loop {
            let next = match self.objective {
                Objective::MinimizeDistance => candidate.min(current),
                Objective::MaximizeScore => candidate.max(current),
            };
            if next == current {
                return;
            }
            match self
                .value
                .compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(observed) => current = observed,
            }
        }
    }

    pub(crate) fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// One cell of the linear-gap recurrence.
#[allow(clippy::too_many_arguments)]
#[inline]
pub(crate) fn score_cell_linear<C: Cell>(
    first: u8,
    second: u8,
    pre_substitution: C,
    pre_insertion: C,
    pre_deletion: C,
    substitution: &dyn Substitution,
    gap: i8,
    objective: Objective,
    floor: Option<C>,
) -> C {
    let s = substitution.cost(first, second);
    let mut subst = add(pre_substitution, s as i64);
    if let Some(f) = floor {
        subst = objective.opt(f, subst);
    }
    let gap_val = add(objective.opt(pre_insertion, pre_deletion), gap as i64);
    objective.opt(subst, gap_val)
}

/// One cell of the affine-gap recurrence, returning
/// `(new, new_insertion, new_deletion)`.
#[allow(clippy::too_many_arguments)]
#[inline]
pub(crate) fn score_cell_affine<C: Cell>(
    first: u8,
    second: u8,
    pre_substitution: C,
    pre_insertion: C,
    pre_deletion: C,
    running_insertion: C,
    running_deletion: C,
    substitution: &dyn Substitution,
    open: i8,
    extend: i8,
    objective: Objective,
    floor: Option<C>,
) -> (C, C, C) {
    let ins = objective.opt(add(pre_insertion, open as i64), add(running_insertion, extend as i64));
    let del = objective.opt(add(pre_deletion, open as i64), add(running_deletion, extend as i64));
    let s = substitution.cost(first, second);
    let mut subst = add(pre_substitution, s as i64);
    if let Some(f) = floor {
        subst = objective.opt(f, subst);
    }
    let cell = objective.opt(subst, objective.opt(ins, del));
    (cell, ins, del)
}
