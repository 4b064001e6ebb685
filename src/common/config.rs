// src/common/config.rs

use super::protocol::MAX_PAYLOAD_LEN;
use crate::registry::SensorTypeId;

/// Per-node settings agreed with the transport layer.
///
/// Loading these from persistent storage is the caller's job; the node only
/// consumes the values.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NodeConfig {
    /// Type id the node runs as after `initialize`.
    pub active_type: SensorTypeId,
    /// Largest payload the transport accepts. Clamped to `MAX_PAYLOAD_LEN`.
    pub max_payload: u8,
}

impl NodeConfig {
    pub const DEFAULT: NodeConfig = NodeConfig {
        active_type: SensorTypeId::DIGITAL,
        max_payload: MAX_PAYLOAD_LEN as u8,
    };

    pub const fn new(active_type: SensorTypeId) -> Self {
        NodeConfig { active_type, ..Self::DEFAULT }
    }

    pub const fn with_max_payload(mut self, max_payload: u8) -> Self {
        self.max_payload = max_payload;
        self
    }

    /// Effective payload limit in bytes.
    #[inline]
    pub const fn max_payload_len(&self) -> usize {
        self.max_payload as usize
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let cfg = NodeConfig::new(SensorTypeId::ANALOG).with_max_payload(16);
        assert_eq!(cfg.active_type, SensorTypeId::ANALOG);
        assert_eq!(cfg.max_payload_len(), 16);
        assert_eq!(NodeConfig::default().max_payload_len(), MAX_PAYLOAD_LEN);
    }
}
