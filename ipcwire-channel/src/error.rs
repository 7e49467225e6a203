//! Channel error types.
//!
//! Every fallible operation in this crate reports failure through these
//! variants; nothing panics on the library path. There is no internal retry:
//! retry and backoff policy belong to the connection manager above.

use thiserror::Error;

/// Errors raised by buffer creation and capacity growth.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// A buffer allocation could not be satisfied. The buffer being grown is
    /// left in its previous valid state.
    #[error("buffer allocation of {requested} bytes failed")]
    Alloc { requested: usize },

    /// The record delimiter was empty at channel creation.
    #[error("record delimiter must not be empty")]
    EmptyDelimiter,
}
