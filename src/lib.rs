//! ipcwire - byte-stream framing for lightweight IPC RPC transports.
//!
//! A per-connection [`Channel`] accumulates inbound socket bytes in a growable
//! circular buffer, extracts complete sentinel-delimited records, and
//! accumulates outbound bytes for flushing back to the socket. The socket
//! adapters in [`ipcwire_io`] bridge a `Channel` to the raw read/write
//! primitives, including partial-write resumption.
//!
//! This facade crate re-exports the public API of the member crates.

pub use ipcwire_channel::{
    Channel, ChannelConfig, ChannelError, ChannelStats, RingBuffer, DEFAULT_BUFFER_CAPACITY,
    MAX_BUFFER_CAPACITY, MIN_BUFFER_CAPACITY, RECORD_DELIMITER,
};
pub use ipcwire_io::{
    fill_inbound, flush_outbound, Endpoint, SocketIo, TransportError, READ_CHUNK_SIZE,
};
