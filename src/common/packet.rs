// src/common/packet.rs

use arrayvec::ArrayVec;

use super::inband::{Directive, InBand};
use super::protocol::MAX_PAYLOAD_LEN;

/// Sensor data in its logical byte form, before/after the type codec runs.
pub type DecodedBuffer = ArrayVec<u8, MAX_PAYLOAD_LEN>;

/// Outcome of a send: how many bytes were written and how to flag them.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Packet {
    pub len: u8,
    pub inband: InBand,
}

impl Packet {
    /// The packet handed out when there is nothing to send, or when the node
    /// cannot produce anything meaningful: zero bytes, CONTROL flag.
    pub const FALLBACK: Packet = Packet { len: 0, inband: InBand::Control };

    pub const fn data(len: u8) -> Self {
        Packet { len, inband: InBand::Data }
    }

    pub const fn control(len: u8) -> Self {
        Packet { len, inband: InBand::Control }
    }

    pub fn is_data(&self) -> bool {
        self.inband == InBand::Data
    }
}

impl Default for Packet {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// What `receive` did with a packet.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Received {
    /// Zero-length data packet; nothing decoded.
    Empty,
    /// A new reading replaced the active type's state.
    Updated,
    /// A control directive was applied (or was a heartbeat).
    Control(Directive),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_packet() {
        let p = Packet::default();
        assert_eq!(p.len, 0);
        assert_eq!(p.inband, InBand::Control);
        assert!(!p.is_data());
        assert!(Packet::data(3).is_data());
    }

    #[test]
    fn test_decoded_buffer_capacity() {
        let buf = DecodedBuffer::new();
        assert_eq!(buf.capacity(), MAX_PAYLOAD_LEN);
    }
}
