//! Inbound and outbound socket adapters.
//!
//! Each adapter performs at most one socket call per invocation and leaves
//! all retry policy to the caller. The channel's cursors carry the resumption
//! state: a failed call leaves them exactly where the last successful
//! transfer put them.

use crate::error::TransportError;
use crate::socket::SocketIo;
use ipcwire_channel::Channel;

/// Performs one bounded read from the socket into `scratch` and appends the
/// received bytes to the channel's inbound buffer, growing it if needed.
///
/// Returns the number of bytes read. `Ok(0)` means the socket had no data
/// this call; interpreting that as end-of-stream is the connection manager's
/// decision. A socket error propagates untouched with the inbound buffer
/// unchanged.
pub fn fill_inbound<S: SocketIo + ?Sized>(
    channel: &mut Channel,
    socket: &mut S,
    scratch: &mut [u8],
) -> Result<usize, TransportError> {
    let n = socket.recv(scratch)?;
    if n > 0 {
        channel.push_inbound(&scratch[..n])?;
        tracing::trace!(bytes = n, "inbound bytes buffered");
    }
    Ok(n)
}

/// Flushes as much of the outbound buffer as the socket will currently
/// accept, one write per call.
///
/// Only the first contiguous occupied segment is offered: `[begin, end)` when
/// the range is linear, the tail `[begin, capacity)` when it wraps. The begin
/// cursor advances by exactly the accepted count, so a partial write never
/// touches the wrapped head segment in the same call - once the tail is fully
/// flushed the cursor wraps to 0 and the next call offers the head.
///
/// Returns the number of bytes accepted (0 when nothing was pending). A
/// socket error propagates untouched with the cursors unchanged.
pub fn flush_outbound<S: SocketIo + ?Sized>(
    channel: &mut Channel,
    socket: &mut S,
) -> Result<usize, TransportError> {
    let accepted = {
        let (first, _) = channel.out_slices();
        if first.is_empty() {
            return Ok(0);
        }
        socket.send(first)?
    };
    channel.consume_out(accepted);
    tracing::trace!(bytes = accepted, "outbound bytes flushed");
    Ok(accepted)
}
