//! Growable circular byte buffer.
//!
//! Cursor layout (one slot always reserved empty to tell "full" from
//! "empty"):
//!
//! ```text
//!         begin              end
//!           |                 |
//!   +-------v-----------------v-------+
//!   | free  | occupied bytes  | free  |
//!   +-------+-----------------+-------+
//!   0                              capacity
//! ```
//!
//! `begin` indexes the oldest unread byte, `end` one past the newest; both
//! stay in `[0, capacity)`. When `begin > end` the occupied range wraps the
//! capacity boundary and every bulk operation splits into at most two copies.
//!
//! Capacity only grows, never shrinks, and always by whole multiples of the
//! creation-time capacity rather than geometric doubling. Peers size their
//! buffers against that increment, so the growth schedule is part of the
//! contract.

use crate::error::ChannelError;

/// A fixed-capacity circular byte buffer that grows on demand.
#[derive(Debug)]
pub struct RingBuffer {
    buf: Vec<u8>,
    /// Index of the oldest unread byte.
    begin: usize,
    /// Index one past the newest byte.
    end: usize,
    /// Creation-time capacity; the unit by which the buffer grows.
    increment: usize,
}

impl RingBuffer {
    /// Allocates a zero-filled buffer of the given capacity.
    ///
    /// One slot is reserved, so `capacity` bytes of storage hold at most
    /// `capacity - 1` bytes of data. `capacity` must be at least 2.
    pub fn with_capacity(capacity: usize) -> Result<Self, ChannelError> {
        assert!(capacity >= 2, "ring buffer capacity must be at least 2");
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| ChannelError::Alloc {
                requested: capacity,
            })?;
        buf.resize(capacity, 0);
        Ok(Self {
            buf,
            begin: 0,
            end: 0,
            increment: capacity,
        })
    }

    /// Returns the allocated capacity.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of occupied bytes.
    pub fn len(&self) -> usize {
        let cap = self.capacity();
        (self.end + cap - self.begin) % cap
    }

    /// Returns whether the buffer holds no data.
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Returns how many bytes can be appended without growing.
    ///
    /// One slot stays reserved, so this is `capacity - 1 - len`.
    pub fn free_space(&self) -> usize {
        self.capacity() - 1 - self.len()
    }

    /// Returns the growth increment (the creation-time capacity).
    pub fn increment(&self) -> usize {
        self.increment
    }

    /// Appends `bytes`, growing the buffer first if free space is short.
    ///
    /// The copy splits in two when it crosses the capacity boundary. On
    /// allocation failure during growth nothing is mutated.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), ChannelError> {
        if bytes.len() > self.free_space() {
            self.grow(bytes.len())?;
        }
        let cap = self.capacity();
        let tail_room = cap - self.end;
        if bytes.len() <= tail_room {
            self.buf[self.end..self.end + bytes.len()].copy_from_slice(bytes);
        } else {
            self.buf[self.end..cap].copy_from_slice(&bytes[..tail_room]);
            self.buf[..bytes.len() - tail_room].copy_from_slice(&bytes[tail_room..]);
        }
        self.end = (self.end + bytes.len()) % cap;
        Ok(())
    }

    /// Grows the buffer until at least `needed` bytes are free.
    ///
    /// Adds the creation-time increment to the capacity (and to the running
    /// free-space estimate) as many times as required, then allocates the new
    /// array, copies the old one whole, and unwraps a wrapped occupied range
    /// into the freshly appended region. The old buffer is only replaced
    /// after every copy succeeded, so a failed allocation leaves it intact.
    fn grow(&mut self, needed: usize) -> Result<(), ChannelError> {
        let old_cap = self.capacity();
        let mut new_cap = old_cap;
        let mut projected = self.free_space();
        while projected < needed {
            new_cap += self.increment;
            projected += self.increment;
        }
        // A wrapped head segment relocates to [old_cap, old_cap + end); the
        // appended region must be large enough to hold it.
        while self.begin > self.end && new_cap < old_cap + self.end {
            new_cap += self.increment;
        }

        let mut new_buf = Vec::new();
        new_buf
            .try_reserve_exact(new_cap)
            .map_err(|_| ChannelError::Alloc { requested: new_cap })?;
        new_buf.resize(new_cap, 0);

        new_buf[..old_cap].copy_from_slice(&self.buf);
        if self.begin > self.end {
            // The occupied range wrapped: relocate the head segment [0, end)
            // to just past the old capacity so [begin, end + old_cap) is the
            // occupied range in the larger array.
            new_buf[old_cap..old_cap + self.end].copy_from_slice(&self.buf[..self.end]);
            self.end += old_cap;
        }
        self.buf = new_buf;

        tracing::trace!(old_cap, new_cap, "ring buffer grown");
        Ok(())
    }

    /// Extracts the next record terminated by `delimiter`.
    ///
    /// Returns `None` when the buffer is empty or holds no complete record
    /// yet; in both cases the cursors are untouched. On a match the record
    /// bytes (delimiter excluded) are returned and `begin` advances past the
    /// delimiter.
    ///
    /// The occupied range is linearized into a temporary contiguous copy for
    /// the scan, so every call re-scans from `begin`. `delimiter` must not be
    /// empty.
    pub fn extract_until(&mut self, delimiter: &[u8]) -> Option<Vec<u8>> {
        debug_assert!(!delimiter.is_empty());
        if self.begin == self.end {
            return None;
        }
        let cap = self.capacity();
        let mut linear = Vec::with_capacity(self.len());
        if self.begin < self.end {
            linear.extend_from_slice(&self.buf[self.begin..self.end]);
        } else {
            linear.extend_from_slice(&self.buf[self.begin..cap]);
            linear.extend_from_slice(&self.buf[..self.end]);
        }

        let at = linear
            .windows(delimiter.len())
            .position(|window| window == delimiter)?;
        self.begin = (self.begin + at + delimiter.len()) % cap;
        linear.truncate(at);
        Some(linear)
    }

    /// Returns the occupied range as up to two contiguous slices.
    ///
    /// The first slice starts at `begin`; the second is the wrapped head
    /// segment and is empty when the range does not wrap. Flushing writes the
    /// first slice only, then advances with [`consume`](Self::consume) - once
    /// the tail is fully consumed `begin` wraps to 0 and the former head
    /// becomes the first slice of the next call.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        if self.begin <= self.end {
            (&self.buf[self.begin..self.end], &[])
        } else {
            (&self.buf[self.begin..], &self.buf[..self.end])
        }
    }

    /// Advances `begin` past `n` consumed bytes.
    ///
    /// `n` must not exceed [`len`](Self::len).
    pub fn consume(&mut self, n: usize) {
        assert!(n <= self.len(), "consumed past the occupied range");
        self.begin = (self.begin + n) % self.capacity();
    }
}
