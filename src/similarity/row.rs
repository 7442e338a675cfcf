//! The row walker: conventional Wagner–Fischer traversal using two rolling
//! rows for linear gaps, or six for affine.
//!
//! Rows run along the shorter string (length `m + 1`); the outer loop steps
//! through the longer string one row at a time. Unlike the diagonal walker,
//! a row has a genuine intra-row dependency (`current[j]` reads
//! `current[j-1]`), so cells within a row are computed strictly left to
//! right through [`crate::similarity::kernel::score_cell_linear`] /
//! [`score_cell_affine`] rather than handed to an executor.
//!
//! The two (or six) rolling rows live in one allocation each, drawn from the
//! caller's [`crate::alloc::Allocator`] up front; "current" and "previous"
//! are just which of the two slots a row index means this step, flipped
//! rather than swapped by value.

use crate::alloc::Allocator;
use crate::error::Result;
use crate::similarity::cost::Substitution;
use crate::similarity::kernel::{score_cell_affine, score_cell_linear, Extremum};
use crate::similarity::scratch::Scratch;
use crate::similarity::{Cell, Locality, Objective};

/// Runs the row walker for a linear gap cost. `shorter.len() <= longer.len()`
/// must already hold (the façade performs the swap).
pub(crate) fn run_linear<C: Cell>(
    shorter: &[u8],
    longer: &[u8],
    substitution: &dyn Substitution,
    gap: i8,
    objective: Objective,
    locality: Locality,
    allocator: &dyn Allocator,
) -> Result<i64> {
    let m = shorter.len();
    let n = longer.len();

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

    let clamp = |raw: i64| -> C {
        match floor {
            Some(f) => C::from_i64(objective.opt(f.to_i64(), raw)),
            None => C::from_i64(raw),
        }
    };

    let mut rows: Scratch<C> = Scratch::new(allocator, 2, m + 1)?;
    for j in 0..=m {
        let cell = clamp(j as i64 * gap as i64);
        rows.set(0, j, cell);
        extremum.update(cell.to_i64());
    }

    let mut previous = 0usize;
    for i in 1..=n {
        let current = 1 - previous;
        let first = clamp(i as i64 * gap as i64);
        rows.set(current, 0, first);
        extremum.update(first.to_i64());
        for j in 1..=m {
            let cell = score_cell_linear(
                shorter[j - 1],
                longer[i - 1],
                rows.get(previous, j - 1),
                rows.get(previous, j),
                rows.get(current, j - 1),
                substitution,
                gap,
                objective,
                floor,
            );
            rows.set(current, j, cell);
            extremum.update(cell.to_i64());
        }
        previous = current;
    }

    let result = match locality {
        Locality::Global => rows.get(previous, m).to_i64(),
        Locality::Local => extremum.get(),
    };
    Ok(result)
}

/// Runs the row walker for an affine gap cost.
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
) -> Result<i64> {
    let m = shorter.len();
    let n = longer.len();

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

    let primary_boundary = |k: usize| -> i64 {
        match locality {
            Locality::Local => 0,
            Locality::Global => {
                if k == 0 {
                    0
                } else {
                    open as i64 + extend as i64 * (k as i64 - 1)
                }
            }
        }
    };
    let running_boundary = |k: usize| -> i64 { primary_boundary(k) + open as i64 + extend as i64 };

    let mut primary: Scratch<C> = Scratch::new(allocator, 2, m + 1)?;
    let mut ins: Scratch<C> = Scratch::new(allocator, 2, m + 1)?;
    let mut del: Scratch<C> = Scratch::new(allocator, 2, m + 1)?;

    for j in 0..=m {
        let cell = C::from_i64(primary_boundary(j));
        primary.set(0, j, cell);
        ins.set(0, j, C::from_i64(running_boundary(j)));
        del.set(0, j, C::from_i64(running_boundary(j)));
        extremum.update(cell.to_i64());
    }

    let mut previous = 0usize;
    for i in 1..=n {
        let current = 1 - previous;
        let first = C::from_i64(primary_boundary(i));
        primary.set(current, 0, first);
        ins.set(current, 0, C::from_i64(running_boundary(i)));
        del.set(current, 0, C::from_i64(running_boundary(i)));
        extremum.update(first.to_i64());

        for j in 1..=m {
            let (cell, new_ins, new_del) = score_cell_affine(
                shorter[j - 1],
                longer[i - 1],
                primary.get(previous, j - 1),
                primary.get(previous, j),
                primary.get(current, j - 1),
                ins.get(previous, j),
                del.get(current, j - 1),
                substitution,
                open,
                extend,
                objective,
                floor,
            );
            primary.set(current, j, cell);
            ins.set(current, j, new_ins);
            del.set(current, j, new_del);
            extremum.update(cell.to_i64());
        }
        previous = current;
    }

    let result = match locality {
        Locality::Global => primary.get(previous, m).to_i64(),
        Locality::Local => extremum.get(),
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::ProcessAllocator;
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
        )
        .unwrap();
        assert_eq!(result, 3);
    }

    #[test]
    fn linear_matches_diagonal_walker() {
        let subs = UniformCost::levenshtein();
        let row_result = run_linear::<u32>(
            b"flaw",
            b"lawn",
            &subs,
            1,
            Objective::MinimizeDistance,
            Locality::Global,
            &ProcessAllocator,
        )
        .unwrap();
        let diagonal_result = crate::similarity::diagonal::run_linear::<u32>(
            b"flaw",
            b"lawn",
            &subs,
            1,
            Objective::MinimizeDistance,
            Locality::Global,
            &ProcessAllocator,
            &crate::executor::SingleThread,
        )
        .unwrap();
        assert_eq!(row_result, diagonal_result);
    }

    #[test]
    fn affine_matches_diagonal_walker_local() {
        let subs = crate::similarity::cost::CostTable::diagonal(1, -1);
        let row_result = run_affine::<i64>(
            b"AGCT",
            b"XXAGCTYY",
            &subs,
            -2,
            -2,
            Objective::MaximizeScore,
            Locality::Local,
            &ProcessAllocator,
        )
        .unwrap();
        let diagonal_result = crate::similarity::diagonal::run_affine::<i64>(
            b"AGCT",
            b"XXAGCTYY",
            &subs,
            -2,
            -2,
            Objective::MaximizeScore,
            Locality::Local,
            &ProcessAllocator,
            &crate::executor::SingleThread,
        )
        .unwrap();
        assert_eq!(row_result, diagonal_result);
        assert_eq!(row_result, 4);
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
        )
        .unwrap();
        assert_eq!(result, 3);
    }
}
