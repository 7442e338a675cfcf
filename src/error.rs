//! The ambient error taxonomy.
//!
//! Kernels and walkers are infallible by construction: the façade picks a cell
//! width wide enough that the recurrence can never overflow, so the only
//! recoverable failure anywhere in this crate is running out of memory for the
//! DP scratch buffer.

use thiserror::Error;

/// The one recoverable failure mode inside the similarity engine.
///
/// On `OutOfMemory`, the caller's output reference is left untouched — never
/// partially written.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The scratch-buffer allocation for the DP matrix failed.
    #[error("allocation of {requested_bytes} bytes for DP scratch failed")]
    OutOfMemory { requested_bytes: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
