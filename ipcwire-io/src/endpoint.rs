//! Async per-connection endpoint.
//!
//! An [`Endpoint`] pairs a [`Channel`] with a tokio stream and a scratch read
//! buffer: the per-connection unit a server task or client owns for the
//! connection's lifetime. The stream is any `AsyncRead + AsyncWrite`; the
//! endpoint never opens or closes it beyond what the owner does with
//! [`into_parts`](Endpoint::into_parts).

use crate::error::TransportError;
use bytes::Bytes;
use ipcwire_channel::{Channel, ChannelConfig};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Size of the scratch buffer for one socket read (8 KiB).
pub const READ_CHUNK_SIZE: usize = 8 * 1024;

/// A channel bound to an async stream.
#[derive(Debug)]
pub struct Endpoint<S> {
    channel: Channel,
    stream: S,
    scratch: Vec<u8>,
}

impl<S> Endpoint<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates an endpoint with the default channel configuration.
    pub fn new(stream: S) -> Result<Self, TransportError> {
        Self::with_config(stream, ChannelConfig::default())
    }

    /// Creates an endpoint with the given channel configuration.
    pub fn with_config(stream: S, config: ChannelConfig) -> Result<Self, TransportError> {
        let channel = Channel::new(config)?;
        Ok(Self {
            channel,
            stream,
            scratch: vec![0u8; READ_CHUNK_SIZE],
        })
    }

    /// Receives the next complete record, reading from the stream as needed.
    ///
    /// Already-buffered records are returned without touching the socket.
    /// End of stream while waiting for a record surfaces as
    /// [`TransportError::Closed`].
    pub async fn recv(&mut self) -> Result<Bytes, TransportError> {
        loop {
            if let Some(record) = self.channel.next_record() {
                return Ok(record);
            }
            let n = self.stream.read(&mut self.scratch).await?;
            if n == 0 {
                tracing::debug!("endpoint stream closed");
                return Err(TransportError::Closed);
            }
            tracing::trace!(bytes = n, "endpoint read");
            self.channel.push_inbound(&self.scratch[..n])?;
        }
    }

    /// Queues one record (payload plus delimiter) and flushes the outbound
    /// buffer to the stream.
    pub async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.channel.queue_record(payload)?;
        self.flush().await
    }

    /// Queues one record without flushing. Useful for batching several
    /// records into one flush.
    pub fn queue(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.channel.queue_record(payload)?;
        Ok(())
    }

    /// Writes the outbound buffer to the stream until it drains.
    ///
    /// Each write offers the first contiguous occupied segment and the begin
    /// cursor advances by whatever the stream accepted, so a wrapped range
    /// flushes tail first, then head.
    pub async fn flush(&mut self) -> Result<(), TransportError> {
        while self.channel.has_pending_out() {
            let accepted = {
                let (first, _) = self.channel.out_slices();
                self.stream.write(first).await?
            };
            if accepted == 0 {
                return Err(TransportError::Closed);
            }
            tracing::trace!(bytes = accepted, "endpoint write");
            self.channel.consume_out(accepted);
        }
        Ok(())
    }

    /// Returns the underlying channel.
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Returns the underlying channel mutably.
    pub fn channel_mut(&mut self) -> &mut Channel {
        &mut self.channel
    }

    /// Dissolves the endpoint into its channel and stream. The stream's
    /// lifecycle stays with the caller.
    pub fn into_parts(self) -> (Channel, S) {
        (self.channel, self.stream)
    }
}
