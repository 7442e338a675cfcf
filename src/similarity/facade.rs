//! The similarity façade: the only public entry point into the DP engine.
//! Picks a cell width, picks a walker, handles the UTF-8 and empty-input
//! short-circuits, and hides the diagonal/row split from callers.

use log::{debug, trace};

use crate::alloc::Allocator;
use crate::error::Result;
use crate::executor::{Executor, SingleThread};
use crate::similarity::cost::{Substitution, UniformCost};
use crate::similarity::estimate::estimate;
use crate::similarity::{diagonal, row, CellWidth, GapCost, Locality, Objective};

/// Below this estimated diagonal length and cell width, the row walker's
/// lower fixed overhead wins.
const ROW_WALKER_DIAGONAL_THRESHOLD: usize = 16;
const ROW_WALKER_MAX_CELL_BYTES: usize = 2;

const DEFAULT_REGISTER_WIDTH: usize = 32;

fn linear_boundary(gap: i8, k: usize) -> i64 {
    k as i64 * gap as i64
}

fn affine_boundary(open: i8, extend: i8, k: usize) -> i64 {
    if k == 0 {
        0
    } else {
        open as i64 + extend as i64 * (k as i64 - 1)
    }
}

/// Calls `$f::<T>` for the `T` matching `$width`, routing to whichever
/// concrete cell type the estimator picked. The walker itself is
/// monomorphic in cell type; this macro is the one dynamic-to-static jump.
macro_rules! dispatch_width {
    ($width:expr, $t:ident => $body:expr) => {
        match $width {
            CellWidth::U8 => { type $t = u8; $body }
            CellWidth::U16 => { type $t = u16; $body }
            CellWidth::U32 => { type $t = u32; $body }
            CellWidth::U64 => { type $t = u64; $body }
            CellWidth::I16 => { type $t = i16; $body }
            CellWidth::I32 => { type $t = i32; $body }
            CellWidth::I64 => { type $t = i64; $body }
        }
    };
}

#[allow(clippy::too_many_arguments)]
fn run_linear_dispatch(
    width: CellWidth,
    use_row: bool,
    shorter: &[u8],
    longer: &[u8],
    substitution: &dyn Substitution,
    gap: i8,
    objective: Objective,
    locality: Locality,
    allocator: &dyn Allocator,
    executor: &dyn Executor,
) -> Result<i64> {
    dispatch_width!(width, T => {
        if use_row {
            row::run_linear::<T>(shorter, longer, substitution, gap, objective, locality, allocator)
        } else {
            diagonal::run_linear::<T>(shorter, longer, substitution, gap, objective, locality, allocator, executor)
        }
    })
}

#[allow(clippy::too_many_arguments)]
fn run_affine_dispatch(
    width: CellWidth,
    use_row: bool,
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
    dispatch_width!(width, T => {
        if use_row {
            row::run_affine::<T>(shorter, longer, substitution, open, extend, objective, locality, allocator)
        } else {
            diagonal::run_affine::<T>(shorter, longer, substitution, open, extend, objective, locality, allocator, executor)
        }
    })
}

/// Orders `a`/`b` so the shorter sequence comes first; both walkers assume
/// this ordering and never check it themselves.
pub(crate) fn order_by_length<'a>(a: &'a [u8], b: &'a [u8]) -> (&'a [u8], &'a [u8]) {
    if a.len() <= b.len() {
        (a, b)
    } else {
        (b, a)
    }
}

pub(crate) fn run_similarity(
    shorter: &[u8],
    longer: &[u8],
    substitution: &dyn Substitution,
    gap: GapCost,
    objective: Objective,
    locality: Locality,
    allocator: &dyn Allocator,
    executor: &dyn Executor,
) -> Result<i64> {
    let affine = gap.as_linear().is_none();
    let signed = objective == Objective::MaximizeScore;
    let req = estimate(
        shorter.len(),
        longer.len(),
        affine,
        substitution.magnitude(),
        gap.magnitude(),
        signed,
        1,
        DEFAULT_REGISTER_WIDTH,
    );
    trace!("similarity request: {:?}", req);

    let use_row = req.max_diagonal_length < ROW_WALKER_DIAGONAL_THRESHOLD
        && req.bytes_per_cell <= ROW_WALKER_MAX_CELL_BYTES;
    debug!("dispatching to {} walker, cell width {:?}", if use_row { "row" } else { "diagonal" }, req.cell_width);

    match gap.as_linear() {
        Some(g) => run_linear_dispatch(req.cell_width, use_row, shorter, longer, substitution, g, objective, locality, allocator, executor),
        None => {
            let (open, extend) = match gap {
                GapCost::Affine { open, extend } => (open, extend),
                GapCost::Linear(_) => unreachable!("as_linear() returned None only for Affine"),
            };
            run_affine_dispatch(req.cell_width, use_row, shorter, longer, substitution, open, extend, objective, locality, allocator, executor)
        }
    }
}

/// Levenshtein edit distance between two byte strings. `bound`, if given,
/// short-circuits to `max(a.len(), b.len()) + 1` once the true distance is
/// known to exceed it.
pub fn edit_distance(a: &[u8], b: &[u8], bound: Option<u64>, allocator: &dyn Allocator) -> Result<u64> {
    if let Some(bnd) = bound {
        let diff = (a.len() as i64 - b.len() as i64).unsigned_abs();
        if diff > bnd {
            return Ok(a.len().max(b.len()) as u64 + 1);
        }
    }
    if a.is_empty() || b.is_empty() {
        let distance = a.len().max(b.len()) as u64;
        return Ok(clamp_to_bound(distance, bound, a.len().max(b.len())));
    }

    let (shorter, longer) = order_by_length(a, b);
    let subs = UniformCost::levenshtein();
    let raw = run_similarity(shorter, longer, &subs, GapCost::Linear(1), Objective::MinimizeDistance, Locality::Global, allocator, &SingleThread)?;
    let distance = raw.max(0) as u64;
    Ok(clamp_to_bound(distance, bound, a.len().max(b.len())))
}

fn clamp_to_bound(distance: u64, bound: Option<u64>, max_len: usize) -> u64 {
    match bound {
        Some(bnd) if distance > bnd => max_len as u64 + 1,
        _ => distance,
    }
}

/// Decodes `bytes` into Unicode scalar values, stopping at the first invalid
/// byte rather than skipping it and resuming (the "longest valid prefix"
/// convention: a malformed tail is dropped, not replaced or skipped over).
fn decode_longest_valid_prefix(bytes: &[u8]) -> Vec<u32> {
    let valid = match std::str::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => std::str::from_utf8(&bytes[..e.valid_up_to()])
            .expect("the prefix up to valid_up_to is always valid UTF-8"),
    };
    valid.chars().map(|c| c as u32).collect()
}

/// Plain Wagner–Fischer Levenshtein distance over decoded codepoints. The
/// codepoint surface is always uniform-cost — there is no alignment-score
/// variant over codepoints — so this bypasses the byte-typed
/// `Substitution`/kernel stack entirely rather than genericizing it over a
/// symbol type for a single caller.
fn codepoint_edit_distance(a: &[u32], b: &[u32], bound: Option<u64>) -> u64 {
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let m = shorter.len();
    let n = longer.len();
    let max_len = m.max(n);

    if let Some(bnd) = bound {
        if (n - m) as u64 > bnd {
            return max_len as u64 + 1;
        }
    }

    let mut previous: Vec<u64> = (0..=m as u64).collect();
    let mut current = vec![0u64; m + 1];
    for i in 1..=n {
        current[0] = i as u64;
        for j in 1..=m {
            let cost = if shorter[j - 1] == longer[i - 1] { 0 } else { 1 };
            current[j] = (previous[j - 1] + cost).min(previous[j] + 1).min(current[j - 1] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    clamp_to_bound(previous[m], bound, max_len)
}

/// Levenshtein edit distance between two UTF-8 strings, counted in Unicode
/// scalar values rather than bytes. Malformed input decodes to its longest
/// valid prefix.
pub fn edit_distance_utf8(a: &[u8], b: &[u8], bound: Option<u64>, allocator: &dyn Allocator) -> Result<u64> {
    if a.is_ascii() && b.is_ascii() {
        return edit_distance(a, b, bound, allocator);
    }
    let runes_a = decode_longest_valid_prefix(a);
    let runes_b = decode_longest_valid_prefix(b);
    Ok(codepoint_edit_distance(&runes_a, &runes_b, bound))
}

/// Hamming distance between two byte strings: positions that differ over
/// the common prefix, plus the length difference.
pub fn hamming_distance(a: &[u8], b: &[u8], bound: Option<u64>) -> u64 {
    let common = a.len().min(b.len());
    let mut differences = 0u64;
    for i in 0..common {
        if a[i] != b[i] {
            differences += 1;
            if let Some(bnd) = bound {
                if differences >= bnd {
                    return bnd;
                }
            }
        }
    }
    let tail = (a.len() as i64 - b.len() as i64).unsigned_abs();
    let total = differences + tail;
    match bound {
        Some(bnd) if total > bnd => bnd,
        _ => total,
    }
}

/// Hamming distance between two UTF-8 strings, counted in Unicode scalar
/// values. Malformed input decodes to its longest valid prefix.
pub fn hamming_distance_utf8(a: &[u8], b: &[u8], bound: Option<u64>) -> u64 {
    if a.is_ascii() && b.is_ascii() {
        return hamming_distance(a, b, bound);
    }
    let runes_a = decode_longest_valid_prefix(a);
    let runes_b = decode_longest_valid_prefix(b);
    let common = runes_a.len().min(runes_b.len());
    let mut differences = 0u64;
    for i in 0..common {
        if runes_a[i] != runes_b[i] {
            differences += 1;
            if let Some(bnd) = bound {
                if differences >= bnd {
                    return bnd;
                }
            }
        }
    }
    let tail = (runes_a.len() as i64 - runes_b.len() as i64).unsigned_abs();
    let total = differences + tail;
    match bound {
        Some(bnd) if total > bnd => bnd,
        _ => total,
    }
}

/// Needleman–Wunsch global alignment score.
pub fn needleman_wunsch_score(a: &[u8], b: &[u8], subs: &dyn Substitution, gap: GapCost, allocator: &dyn Allocator) -> Result<i64> {
    if a.is_empty() || b.is_empty() {
        let k = a.len().max(b.len());
        let boundary = match gap {
            GapCost::Linear(g) => linear_boundary(g, k),
            GapCost::Affine { open, extend } => affine_boundary(open, extend, k),
        };
        return Ok(boundary);
    }
    let (shorter, longer) = order_by_length(a, b);
    run_similarity(shorter, longer, subs, gap, Objective::MaximizeScore, Locality::Global, allocator, &SingleThread)
}

/// Smith–Waterman local alignment score: the best-scoring aligned substring
/// pair, never below zero.
pub fn smith_waterman_score(a: &[u8], b: &[u8], subs: &dyn Substitution, gap: GapCost, allocator: &dyn Allocator) -> Result<i64> {
    if a.is_empty() || b.is_empty() {
        return Ok(0);
    }
    let (shorter, longer) = order_by_length(a, b);
    run_similarity(shorter, longer, subs, gap, Objective::MaximizeScore, Locality::Local, allocator, &SingleThread)
}
