#![forbid(unsafe_code)]

//! Byte-level scanning, bulk transforms, a byte checksum, and
//! dynamic-programming string similarity (Levenshtein edit distance,
//! Needleman–Wunsch global alignment, Smith–Waterman local alignment) over
//! byte strings and short Unicode text.
//!
//! The similarity engine (see [`similarity`]) is the hard part: a
//! parameterized DP machine driven by either an anti-diagonal walker or a
//! row-major Wagner–Fischer walker, with adaptive cell width chosen per
//! call from the two input lengths and the substitution/gap magnitudes.
//! Scanning ([`scan`]), bulk transforms ([`transform`]), and the checksum
//! ([`checksum`]) are independent of it and of each other.
//!
//! Every fallible entry point returns [`error::Result`]; the only
//! recoverable failure anywhere in this crate is running out of memory for
//! a DP scratch buffer.

pub mod alloc;
pub mod checksum;
pub mod error;
pub mod executor;
pub mod scan;
pub mod similarity;
pub mod small_string;
pub mod transform;

pub use alloc::{Allocator, ProcessAllocator};
pub use error::{Error, Result};
pub use executor::{Executor, SingleThread};
pub use scan::{find, find_byte, find_byte_set, rfind, rfind_byte, rfind_byte_set, ByteSet};
pub use similarity::{
    edit_distance, edit_distance_utf8, hamming_distance, hamming_distance_utf8, needleman_wunsch_score,
    score_pairs, smith_waterman_score, AsciiCostTable, CostTable, GapCost, Locality, MemoryRequirements,
    Objective, Substitution, UniformCost,
};
pub use transform::{copy, fill, look_up_transform, move_bytes, LookupTable};
