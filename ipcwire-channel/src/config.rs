//! Channel configuration.

use crate::{DEFAULT_BUFFER_CAPACITY, MAX_BUFFER_CAPACITY, MIN_BUFFER_CAPACITY, RECORD_DELIMITER};

/// Creation parameters for a [`Channel`](crate::Channel).
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Capacity of each buffer in bytes. Clamped into
    /// `[MIN_BUFFER_CAPACITY, MAX_BUFFER_CAPACITY]`; the clamped value is
    /// also the increment by which the buffers grow later.
    pub capacity: usize,
    /// Record delimiter. Must not be empty.
    pub delimiter: Vec<u8>,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_BUFFER_CAPACITY,
            delimiter: RECORD_DELIMITER.to_vec(),
        }
    }
}

impl ChannelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-direction buffer capacity, silently clamped into the
    /// supported range.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.clamp(MIN_BUFFER_CAPACITY, MAX_BUFFER_CAPACITY);
        self
    }

    /// Sets the record delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<Vec<u8>>) -> Self {
        self.delimiter = delimiter.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ChannelConfig::default();
        assert_eq!(config.capacity, DEFAULT_BUFFER_CAPACITY);
        assert_eq!(config.delimiter, RECORD_DELIMITER);
    }

    #[test]
    fn test_config_capacity_clamping() {
        let config = ChannelConfig::new().with_capacity(100); // Below minimum
        assert_eq!(config.capacity, MIN_BUFFER_CAPACITY);

        let config = ChannelConfig::new().with_capacity(10 * 1024 * 1024); // Above maximum
        assert_eq!(config.capacity, MAX_BUFFER_CAPACITY);
    }

    #[test]
    fn test_config_custom_delimiter() {
        let config = ChannelConfig::new().with_delimiter(b"\r\n".to_vec());
        assert_eq!(config.delimiter, b"\r\n");
    }
}
