//! # ipcwire-io
//!
//! Socket adapters bridging an ipcwire [`Channel`](ipcwire_channel::Channel)
//! to raw socket read/write primitives.
//!
//! This crate provides:
//! - The [`SocketIo`] primitive contract and implementations for std sockets
//! - The inbound and outbound adapters ([`fill_inbound`], [`flush_outbound`])
//!   with partial-write resumption
//! - An async per-connection [`Endpoint`] over any tokio stream

pub mod adapter;
pub mod endpoint;
pub mod error;
pub mod socket;

pub use adapter::{fill_inbound, flush_outbound};
pub use endpoint::{Endpoint, READ_CHUNK_SIZE};
pub use error::TransportError;
pub use socket::SocketIo;
