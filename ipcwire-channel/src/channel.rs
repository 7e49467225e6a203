//! Per-connection channel context.
//!
//! A [`Channel`] owns one inbound and one outbound [`RingBuffer`] plus the
//! record delimiter. It is the unit of lifetime: created when a connection is
//! established, dropped when it closes, and never shared across connections.
//! The socket handle itself stays with the connection manager - the adapters
//! in `ipcwire-io` borrow it per call.
//!
//! A channel is not internally synchronized. It is designed for exclusive
//! access by the one execution context that owns the connection, which the
//! `&mut self` receivers enforce.

use crate::config::ChannelConfig;
use crate::error::ChannelError;
use crate::ring::RingBuffer;
use crate::{MAX_BUFFER_CAPACITY, MIN_BUFFER_CAPACITY};
use bytes::Bytes;

/// Byte and record transfer counters for one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    /// Bytes appended to the inbound buffer.
    pub bytes_in: u64,
    /// Bytes drained from the outbound buffer.
    pub bytes_out: u64,
    /// Complete records extracted from the inbound buffer.
    pub records_extracted: u64,
    /// Records queued on the outbound buffer.
    pub records_queued: u64,
}

/// The per-connection pair of circular buffers plus the record delimiter.
#[derive(Debug)]
pub struct Channel {
    inbound: RingBuffer,
    outbound: RingBuffer,
    delimiter: Vec<u8>,
    stats: ChannelStats,
}

impl Channel {
    /// Creates a channel from the given configuration.
    ///
    /// The requested capacity is clamped into
    /// [`MIN_BUFFER_CAPACITY`]`..=`[`MAX_BUFFER_CAPACITY`] and both buffers
    /// are allocated at the clamped size with cursors at 0. If the second
    /// allocation fails the first buffer is released on the way out.
    pub fn new(config: ChannelConfig) -> Result<Self, ChannelError> {
        if config.delimiter.is_empty() {
            return Err(ChannelError::EmptyDelimiter);
        }
        let capacity = config.capacity.clamp(MIN_BUFFER_CAPACITY, MAX_BUFFER_CAPACITY);
        let inbound = RingBuffer::with_capacity(capacity)?;
        let outbound = RingBuffer::with_capacity(capacity)?;
        tracing::debug!(capacity, "channel created");
        Ok(Self {
            inbound,
            outbound,
            delimiter: config.delimiter,
            stats: ChannelStats::default(),
        })
    }

    /// Creates a channel with the default configuration.
    pub fn with_defaults() -> Result<Self, ChannelError> {
        Self::new(ChannelConfig::default())
    }

    /// Returns the record delimiter.
    pub fn delimiter(&self) -> &[u8] {
        &self.delimiter
    }

    /// Returns the transfer counters.
    pub fn stats(&self) -> ChannelStats {
        self.stats
    }

    /// Appends bytes read from the socket to the inbound buffer, growing it
    /// if needed.
    pub fn push_inbound(&mut self, bytes: &[u8]) -> Result<(), ChannelError> {
        self.inbound.append(bytes)?;
        self.stats.bytes_in += bytes.len() as u64;
        Ok(())
    }

    /// Extracts the next complete record from the inbound buffer.
    ///
    /// Returns one record per call with the delimiter stripped; call
    /// repeatedly to drain several records that arrived in a single read.
    /// Returns `None` when the buffer is empty or holds only a partial
    /// record - the partial bytes stay buffered for the next read.
    pub fn next_record(&mut self) -> Option<Bytes> {
        let record = self.inbound.extract_until(&self.delimiter)?;
        self.stats.records_extracted += 1;
        Some(Bytes::from(record))
    }

    /// Returns the number of bytes buffered inbound (partial records
    /// included).
    pub fn pending_in(&self) -> usize {
        self.inbound.len()
    }

    /// Queues raw bytes on the outbound buffer without a trailing delimiter.
    pub fn queue_bytes(&mut self, bytes: &[u8]) -> Result<(), ChannelError> {
        self.outbound.append(bytes)
    }

    /// Queues one record on the outbound buffer: the payload followed by the
    /// delimiter.
    pub fn queue_record(&mut self, payload: &[u8]) -> Result<(), ChannelError> {
        self.outbound.append(payload)?;
        self.outbound.append(&self.delimiter)?;
        self.stats.records_queued += 1;
        Ok(())
    }

    /// Returns whether outbound bytes are waiting to be flushed.
    pub fn has_pending_out(&self) -> bool {
        !self.outbound.is_empty()
    }

    /// Returns the number of outbound bytes waiting to be flushed.
    pub fn pending_out(&self) -> usize {
        self.outbound.len()
    }

    /// Returns the outbound occupied range as up to two contiguous slices,
    /// first (tail) segment first. See [`RingBuffer::as_slices`].
    pub fn out_slices(&self) -> (&[u8], &[u8]) {
        self.outbound.as_slices()
    }

    /// Records `n` outbound bytes as accepted by the socket, advancing the
    /// buffer's begin cursor by exactly that count.
    ///
    /// Partial-write resumption state lives entirely in that cursor: after a
    /// short write the next flush resumes from the first unaccepted byte.
    pub fn consume_out(&mut self, n: usize) {
        self.outbound.consume(n);
        self.stats.bytes_out += n as u64;
    }

    /// Returns the inbound buffer capacity.
    pub fn inbound_capacity(&self) -> usize {
        self.inbound.capacity()
    }

    /// Returns the outbound buffer capacity.
    pub fn outbound_capacity(&self) -> usize {
        self.outbound.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RECORD_DELIMITER;

    fn small_channel() -> Channel {
        Channel::new(ChannelConfig::default()).unwrap()
    }

    #[test]
    fn test_channel_creation() {
        let channel = Channel::with_defaults().unwrap();
        assert_eq!(channel.delimiter(), RECORD_DELIMITER);
        assert_eq!(channel.inbound_capacity(), crate::DEFAULT_BUFFER_CAPACITY);
        assert_eq!(channel.outbound_capacity(), crate::DEFAULT_BUFFER_CAPACITY);
        assert_eq!(channel.stats(), ChannelStats::default());
    }

    #[test]
    fn test_capacity_clamped_to_minimum() {
        // Bypass the builder so creation itself does the clamping.
        let channel = Channel::new(ChannelConfig {
            capacity: 1,
            delimiter: RECORD_DELIMITER.to_vec(),
        })
        .unwrap();
        assert_eq!(channel.inbound_capacity(), MIN_BUFFER_CAPACITY);
        assert_eq!(channel.outbound_capacity(), MIN_BUFFER_CAPACITY);
    }

    #[test]
    fn test_capacity_clamped_to_maximum() {
        let channel = Channel::new(ChannelConfig {
            capacity: 64 * 1024 * 1024,
            delimiter: RECORD_DELIMITER.to_vec(),
        })
        .unwrap();
        assert_eq!(channel.inbound_capacity(), MAX_BUFFER_CAPACITY);
        assert_eq!(channel.outbound_capacity(), MAX_BUFFER_CAPACITY);
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let result = Channel::new(ChannelConfig::default().with_delimiter(b"".to_vec()));
        assert!(matches!(result, Err(ChannelError::EmptyDelimiter)));
    }

    #[test]
    fn test_record_framing() {
        let mut channel = small_channel();
        channel.push_inbound(b"hello$$$$$$").unwrap();
        assert_eq!(channel.next_record().unwrap(), Bytes::from_static(b"hello"));
        // Drained: the same call now reports no data.
        assert!(channel.next_record().is_none());
    }

    #[test]
    fn test_partial_record_completes_later() {
        let mut channel = small_channel();
        channel.push_inbound(b"hello").unwrap();
        assert!(channel.next_record().is_none());
        assert_eq!(channel.pending_in(), 5);

        channel.push_inbound(b"$$$$$$").unwrap();
        assert_eq!(channel.next_record().unwrap(), Bytes::from_static(b"hello"));
        assert_eq!(channel.pending_in(), 0);
    }

    #[test]
    fn test_multiple_records_in_one_read() {
        let mut channel = small_channel();
        channel.push_inbound(b"one$$$$$$two$$$$$$three").unwrap();
        assert_eq!(channel.next_record().unwrap(), Bytes::from_static(b"one"));
        assert_eq!(channel.next_record().unwrap(), Bytes::from_static(b"two"));
        // "three" has no terminator yet.
        assert!(channel.next_record().is_none());
        assert_eq!(channel.pending_in(), 5);
    }

    #[test]
    fn test_custom_delimiter() {
        let mut channel = Channel::new(ChannelConfig::default().with_delimiter(b"\n".to_vec()))
            .unwrap();
        channel.push_inbound(b"line one\nline two\n").unwrap();
        assert_eq!(channel.next_record().unwrap(), Bytes::from_static(b"line one"));
        assert_eq!(channel.next_record().unwrap(), Bytes::from_static(b"line two"));
    }

    #[test]
    fn test_queue_record_appends_delimiter() {
        let mut channel = small_channel();
        channel.queue_record(b"ping").unwrap();
        assert_eq!(channel.pending_out(), 4 + RECORD_DELIMITER.len());
        let (first, second) = channel.out_slices();
        assert_eq!(first, b"ping$$$$$$");
        assert!(second.is_empty());
    }

    #[test]
    fn test_consume_out_tracks_partial_writes() {
        let mut channel = small_channel();
        channel.queue_record(b"payload").unwrap();
        let total = channel.pending_out();
        channel.consume_out(3);
        assert_eq!(channel.pending_out(), total - 3);
        let (first, _) = channel.out_slices();
        assert_eq!(&first[..4], b"load");
    }

    #[test]
    fn test_inbound_growth_keeps_records() {
        // Minimum capacity, then a record bigger than the free space.
        let mut channel = Channel::new(ChannelConfig::default().with_capacity(0)).unwrap();
        let payload = vec![0x5A; 2 * MIN_BUFFER_CAPACITY];
        channel.push_inbound(&payload).unwrap();
        channel.push_inbound(RECORD_DELIMITER).unwrap();
        let record = channel.next_record().unwrap();
        assert_eq!(record.len(), payload.len());
        assert!(record.iter().all(|&b| b == 0x5A));
        assert_eq!(channel.inbound_capacity() % MIN_BUFFER_CAPACITY, 0);
    }

    #[test]
    fn test_stats_counters() {
        let mut channel = small_channel();
        channel.push_inbound(b"a$$$$$$b$$$$$$").unwrap();
        channel.next_record().unwrap();
        channel.next_record().unwrap();
        channel.queue_record(b"out").unwrap();
        let pending = channel.pending_out();
        channel.consume_out(pending);

        let stats = channel.stats();
        assert_eq!(stats.bytes_in, 14);
        assert_eq!(stats.records_extracted, 2);
        assert_eq!(stats.records_queued, 1);
        assert_eq!(stats.bytes_out, pending as u64);
    }
}
