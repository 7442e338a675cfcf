//! Memory requirements estimator.
//!
//! Computed once per top-level call, before any allocation: the façade asks
//! "how big a cell, how many diagonals, how many bytes total" and only then
//! talks to the allocator. Kept a pure function of the two lengths and the
//! two magnitudes so it can be called speculatively (e.g. by a caller sizing
//! its own arena) without touching the DP machinery at all.

use crate::similarity::CellWidth;

/// The sized, allocation-ready answer to "what does this DP call cost?"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryRequirements {
    pub max_diagonal_length: usize,
    pub max_cell_value: i64,
    pub cell_width: CellWidth,
    pub bytes_per_cell: usize,
    pub bytes_per_diagonal: usize,
    pub diagonals_needed: usize,
    pub total_bytes: usize,
}

#[inline]
fn round_up(value: usize, register_width: usize) -> usize {
    if register_width == 0 {
        return value;
    }
    let remainder = value % register_width;
    if remainder == 0 {
        value
    } else {
        value + (register_width - remainder)
    }
}

/// Smallest width in `{u8, u16, u32, u64}` (or `{i16, i32, i64}` when `signed`)
/// whose range admits `max_cell_value`; signed scores use the half-range so
/// negative cells still fit.
fn select_width(max_cell_value: i64, signed: bool) -> CellWidth {
    debug_assert!(max_cell_value >= 0);
    if signed {
        if max_cell_value < (1i64 << 15) {
            CellWidth::I16
        } else if max_cell_value < (1i64 << 31) {
            CellWidth::I32
        } else {
            CellWidth::I64
        }
    } else if max_cell_value < (1i64 << 8) {
        CellWidth::U8
    } else if max_cell_value < (1i64 << 16) {
        CellWidth::U16
    } else if max_cell_value < (1i64 << 32) {
        CellWidth::U32
    } else {
        CellWidth::U64
    }
}

/// Computes `MemoryRequirements` for a DP call over strings of length
/// `len_a`/`len_b`, with the given cost magnitudes.
///
/// `signed` selects the unsigned (Levenshtein) or signed (NW/SW) cell-width
/// ladder. If either length is 0, every field is zero.
#[allow(clippy::too_many_arguments)]
pub fn estimate(
    len_a: usize,
    len_b: usize,
    affine: bool,
    substitution_magnitude: i32,
    gap_magnitude: i32,
    signed: bool,
    bytes_per_char: usize,
    register_width: usize,
) -> MemoryRequirements {
    if len_a == 0 || len_b == 0 {
        return MemoryRequirements {
            max_diagonal_length: 0,
            max_cell_value: 0,
            cell_width: select_width(0, signed),
            bytes_per_cell: 0,
            bytes_per_diagonal: 0,
            diagonals_needed: 0,
            total_bytes: 0,
        };
    }

    let max_diagonal_length = len_a.min(len_b) + 1;
    let magnitude = substitution_magnitude.max(gap_magnitude) as i64;
    let max_cell_value = (len_a.max(len_b) as i64 + 1) * magnitude;
    let cell_width = select_width(max_cell_value, signed);
    let bytes_per_cell = cell_width.bytes();
    let bytes_per_diagonal = round_up(max_diagonal_length * bytes_per_cell, register_width);
    let diagonals_needed = if affine { 7 } else { 3 };
    let total_bytes = diagonals_needed * bytes_per_diagonal
        + round_up(len_a * bytes_per_char, register_width)
        + round_up(len_b * bytes_per_char, register_width);

    MemoryRequirements {
        max_diagonal_length,
        max_cell_value,
        cell_width,
        bytes_per_cell,
        bytes_per_diagonal,
        diagonals_needed,
        total_bytes,
    }
}
