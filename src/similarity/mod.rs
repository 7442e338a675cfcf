//! The similarity engine: parameterized dynamic-programming machinery for
//! Levenshtein edit distance, Needleman–Wunsch global alignment, and
//! Smith–Waterman local alignment.
//!
//! Rather than one kernel variant per (cell-width × locality × gap-model ×
//! objective) combination, this collapses to a handful of generic functions
//! parameterized by the small tag-set below ([`Objective`], [`Locality`],
//! [`GapCost`]) plus the [`Cell`] trait for the numeric width.

use std::convert::TryInto;

mod batch;
mod cost;
mod diagonal;
mod estimate;
mod facade;
mod kernel;
mod row;
mod scratch;

pub use batch::score_pairs;
pub use cost::{AsciiCostTable, CostTable, Substitution, UniformCost};
pub use estimate::MemoryRequirements;
pub use facade::{
    edit_distance, edit_distance_utf8, hamming_distance, hamming_distance_utf8,
    needleman_wunsch_score, smith_waterman_score,
};

/// Whether the DP recurrence is minimizing a distance or maximizing a score.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Objective {
    MinimizeDistance,
    MaximizeScore,
}

impl Objective {
    /// `min` for distances, `max` for scores.
    #[inline]
    fn opt<C: Ord>(self, a: C, b: C) -> C {
        match self {
            Objective::MinimizeDistance => a.min(b),
            Objective::MaximizeScore => a.max(b),
        }
    }
}

/// Whether the alignment is end-to-end or the best-scoring substring pair.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Locality {
    Global,
    Local,
}

/// Gap cost model. Values are signed 8-bit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GapCost {
    Linear(i8),
    Affine { open: i8, extend: i8 },
}

impl GapCost {
    /// The magnitude used for cell-width admissibility.
    pub fn magnitude(self) -> i32 {
        match self {
            GapCost::Linear(g) => (g as i32).abs(),
            GapCost::Affine { open, extend } => (open as i32).abs().max((extend as i32).abs()),
        }
    }

    /// Affine with `open == extend` collapses to the linear model. Returns
    /// the equivalent linear gap if this is that degenerate case.
    pub fn as_linear(self) -> Option<i8> {
        match self {
            GapCost::Linear(g) => Some(g),
            GapCost::Affine { open, extend } if open == extend => Some(open),
            GapCost::Affine { .. } => None,
        }
    }
}

/// A narrow-width DP cell. Implemented for the four unsigned widths (used by
/// Levenshtein, which only ever needs non-negative distances) and the three
/// signed widths (used by NW/SW scores, which may be negative). Arithmetic is
/// carried out in `i64` and narrowed back via [`Cell::from_i64`]; the façade's
/// cell-width selection guarantees ahead of time that every value produced
/// during a given call fits, so narrowing never truncates.
///
/// `BYTES`/`write_ne_bytes`/`read_ne_bytes` let a cell be stored in a raw
/// byte buffer (see `scratch::Scratch`) instead of a typed `Vec<C>`, so the
/// walkers' rolling storage can be drawn from an injected [`crate::alloc::Allocator`]
/// without `unsafe` reinterpretation.
pub trait Cell: Copy + Ord + std::fmt::Debug + 'static {
    const ZERO: Self;
    const BYTES: usize;
    fn from_i64(v: i64) -> Self;
    fn to_i64(self) -> i64;
    fn write_ne_bytes(self, out: &mut [u8]);
    fn read_ne_bytes(bytes: &[u8]) -> Self;
}

macro_rules! impl_cell {
    ($($t:ty),*) => {
        $(impl Cell for $t {
            const ZERO: Self = 0;
            const BYTES: usize = std::mem::size_of::<$t>();
            #[inline]
            fn from_i64(v: i64) -> Self { v as $t }
            #[inline]
            fn to_i64(self) -> i64 { self as i64 }
            #[inline]
            fn write_ne_bytes(self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_ne_bytes());
            }
            #[inline]
            fn read_ne_bytes(bytes: &[u8]) -> Self {
                Self::from_ne_bytes(bytes.try_into().expect("slice length matches Self::BYTES"))
            }
        })*
    };
}
impl_cell!(u8, u16, u32, u64, i16, i32, i64);

/// `a + delta`, narrowed back to `C`. See [`Cell`] for why this cannot overflow
/// in a correctly-sized call.
#[inline]
fn add<C: Cell>(a: C, delta: i64) -> C {
    C::from_i64(a.to_i64() + delta)
}

/// The width of one DP cell, as selected by the memory estimator and the
/// similarity façade.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellWidth {
    /// Unsigned, for Levenshtein distances.
    U8,
    U16,
    U32,
    U64,
    /// Signed, for NW/SW scores.
    I16,
    I32,
    I64,
}

impl CellWidth {
    pub fn bytes(self) -> usize {
        match self {
            CellWidth::U8 => 1,
            CellWidth::U16 | CellWidth::I16 => 2,
            CellWidth::U32 | CellWidth::I32 => 4,
            CellWidth::U64 | CellWidth::I64 => 8,
        }
    }
}
