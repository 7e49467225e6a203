//! # ipcwire-channel
//!
//! Per-connection byte buffering and record framing for the ipcwire IPC RPC
//! transport.
//!
//! This crate provides:
//! - A growable circular byte buffer with wrap-aware append and extraction
//! - Record framing over an unstructured byte stream via a fixed sentinel
//! - The per-connection [`Channel`] pairing an inbound and an outbound buffer
//! - Builder-style channel configuration with capacity clamping

pub mod channel;
pub mod config;
pub mod error;
pub mod ring;

pub use channel::{Channel, ChannelStats};
pub use config::ChannelConfig;
pub use error::ChannelError;
pub use ring::RingBuffer;

/// Sentinel byte sequence terminating one record on the wire.
///
/// There is no length field and no escaping: a payload that happens to
/// contain these bytes will be misframed. This matches the wire format of
/// existing peers and must not change.
pub const RECORD_DELIMITER: &[u8] = b"$$$$$$";

/// Default buffer capacity per direction (8 KiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Minimum buffer capacity (1 KiB). Smaller requests are clamped up.
pub const MIN_BUFFER_CAPACITY: usize = 1024;

/// Maximum creation-time buffer capacity (1 MiB). Larger requests are
/// clamped down. Growth after creation is not bounded by this value.
pub const MAX_BUFFER_CAPACITY: usize = 1024 * 1024;
