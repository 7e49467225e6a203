//! Transport error types.

use ipcwire_channel::ChannelError;
use thiserror::Error;

/// Errors surfaced by the socket adapters and the async endpoint.
///
/// Socket errors are propagated untouched from the underlying primitive; the
/// channel's cursors are left exactly where the last successful transfer put
/// them, so the owner can retry or tear the connection down.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection closed by peer")]
    Closed,

    #[error(transparent)]
    Channel(#[from] ChannelError),
}
