// src/node/sender.rs

use super::Node;
use crate::common::{Directive, Packet, SmartSensorError};

impl Node {
    /// Fills `out` with the next packet for the bus.
    ///
    /// `out` must hold at least `config().max_payload` bytes. A pending reading
    /// is sent once as DATA and its pending marker cleared; with nothing pending
    /// the result is the empty CONTROL heartbeat. If the active type has no
    /// codec the packet is a CONTROL `Unsupported` notice.
    ///
    /// `out[..len]` is only written once the whole payload is known to fit.
    pub fn send(&mut self, out: &mut [u8]) -> Result<Packet, SmartSensorError> {
        if !self.initialized {
            tracing::warn!("send before initialize");
            return Err(SmartSensorError::NotInitialized);
        }
        let max = self.config.max_payload_len();
        if out.len() < max {
            return Err(SmartSensorError::BufferTooSmall { needed: max, got: out.len() });
        }
        let out = &mut out[..max];

        let active = self.active;
        let Some(desc) = self.registry.get_mut(active) else {
            return Ok(match Directive::Unsupported(active).write_into(out) {
                Ok(n) => Packet::control(n as u8),
                Err(_) => Packet::FALLBACK,
            });
        };

        let reading = match desc.state.reading {
            Some(reading) if desc.state.pending => reading,
            _ => return Ok(Packet::FALLBACK),
        };

        let payload = match desc.encode(&reading) {
            Ok(payload) if payload.len() <= max => payload,
            Ok(payload) => {
                tracing::warn!("encoded payload of {} bytes exceeds limit {}", payload.len(), max);
                self.diagnostics.encode_errors = self.diagnostics.encode_errors.wrapping_add(1);
                return Ok(Packet::FALLBACK);
            }
            Err(e) => {
                tracing::warn!("encode failed for type {}: {}", active, e);
                self.diagnostics.encode_errors = self.diagnostics.encode_errors.wrapping_add(1);
                return Ok(Packet::FALLBACK);
            }
        };

        out[..payload.len()].copy_from_slice(&payload);
        desc.state.pending = false;
        tracing::debug!("sent {} data bytes for type {}", payload.len(), active);
        // payload.len() <= max <= u8::MAX
        Ok(Packet::data(payload.len() as u8))
    }
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicU8, Ordering};

    use crate::common::protocol::OP_UNSUPPORTED;
    use crate::common::{
        CodecError, DecodedBuffer, InBand, NodeConfig, Packet, SmartSensorError, MAX_PAYLOAD_LEN,
    };
    use crate::node::Node;
    use crate::registry::{SensorTypeId, TypeDescriptor, TypeState};
    use crate::types::{AnalogReading, DigitalReading, Reading, ServoReading};

    fn ready(config: NodeConfig) -> Node {
        let mut node = Node::with_builtin_types(config);
        node.initialize();
        node
    }

    #[test]
    fn test_send_before_init() {
        let mut node = Node::default();
        let mut buf = [0xAAu8; MAX_PAYLOAD_LEN];
        assert_eq!(node.send(&mut buf), Err(SmartSensorError::NotInitialized));
        assert!(buf.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_send_buffer_too_small() {
        let mut node = ready(NodeConfig::DEFAULT.with_max_payload(8));
        let mut buf = [0u8; 4];
        assert_eq!(
            node.send(&mut buf),
            Err(SmartSensorError::BufferTooSmall { needed: 8, got: 4 })
        );
    }

    #[test]
    fn test_send_without_reading_is_heartbeat() {
        let mut node = ready(NodeConfig::DEFAULT);
        let mut buf = [0u8; MAX_PAYLOAD_LEN];
        assert_eq!(node.send(&mut buf), Ok(Packet::FALLBACK));
    }

    #[test]
    fn test_send_clears_pending() {
        let mut node = ready(NodeConfig::DEFAULT);
        node.update_reading(Reading::Digital(DigitalReading::from_bits(0b0110).unwrap()))
            .unwrap();

        let mut buf = [0u8; MAX_PAYLOAD_LEN];
        let first = node.send(&mut buf).unwrap();
        assert_eq!(first, Packet::data(1));
        assert_eq!(buf[0], 0b0110);
        assert!(!node.state().unwrap().pending);

        // Same reading is not sent twice.
        let second = node.send(&mut buf).unwrap();
        assert_eq!(second.len, 0);
        assert_eq!(second.inband, InBand::Control);
        // The reading itself is still held.
        assert!(node.reading().is_some());
    }

    #[test]
    fn test_send_unsupported_type() {
        let mut node = ready(NodeConfig::new(SensorTypeId(0x42)));
        let mut buf = [0u8; MAX_PAYLOAD_LEN];
        assert_eq!(node.send(&mut buf), Ok(Packet::control(2)));
        assert_eq!(&buf[..2], &[OP_UNSUPPORTED, 0x42]);
    }

    #[test]
    fn test_send_unsupported_type_tiny_limit() {
        let mut node = ready(NodeConfig::new(SensorTypeId(0x42)).with_max_payload(1));
        let mut buf = [0xAAu8; 1];
        assert_eq!(node.send(&mut buf), Ok(Packet::FALLBACK));
        assert_eq!(buf, [0xAA]);
    }

    #[test]
    fn test_send_payload_over_limit() {
        // Four analog channels need 9 bytes, the transport only takes 4.
        let mut node = ready(NodeConfig::new(SensorTypeId::ANALOG).with_max_payload(4));
        assert_eq!(
            node.update_reading(Reading::Analog(AnalogReading::new(&[1, 2, 3, 4]).unwrap())),
            Err(SmartSensorError::Encode(CodecError::Overflow))
        );
        assert_eq!(node.state(), Some(&TypeState::EMPTY));

        let mut buf = [0xAAu8; 4];
        assert_eq!(node.send(&mut buf), Ok(Packet::FALLBACK));
        assert_eq!(buf, [0xAA; 4]);
        assert_eq!(node.diagnostics().encode_errors, 0);
    }

    static GROWING_CALLS: AtomicU8 = AtomicU8::new(0);

    // Emits one more byte on every call.
    fn growing_encode(_: &Reading, out: &mut DecodedBuffer) -> Result<(), CodecError> {
        let n = GROWING_CALLS.fetch_add(1, Ordering::Relaxed) + 1;
        for _ in 0..n {
            out.try_push(0xEE).map_err(|_| CodecError::Overflow)?;
        }
        Ok(())
    }

    fn growing_decode(_: &[u8]) -> Result<Reading, CodecError> {
        Ok(Reading::Digital(DigitalReading::default()))
    }

    #[test]
    fn test_send_guards_codec_output_over_limit() {
        let id = SensorTypeId(0x90);
        let mut node = Node::new(NodeConfig::new(id).with_max_payload(1));
        node.registry_mut()
            .register(TypeDescriptor::new(id, "growing", growing_encode, growing_decode))
            .unwrap();
        node.initialize();

        // One byte at publish time, two by the time it is sent.
        node.update_reading(Reading::Digital(DigitalReading::default())).unwrap();
        let mut buf = [0xAAu8; 1];
        assert_eq!(node.send(&mut buf), Ok(Packet::FALLBACK));
        assert_eq!(buf, [0xAA]);
        assert_eq!(node.diagnostics().encode_errors, 1);
        assert!(node.state().unwrap().pending);
    }

    #[test]
    fn test_send_length_never_exceeds_limit() {
        for max in [0u8, 1, 2, 4, 5, 9, 64, 255] {
            let mut node = ready(NodeConfig::new(SensorTypeId::ANALOG).with_max_payload(max));
            // Rejected outright when the 5-byte payload does not fit.
            let _ = node.update_reading(Reading::Analog(AnalogReading::new(&[7, 8]).unwrap()));
            let mut buf = [0u8; MAX_PAYLOAD_LEN];
            let packet = node.send(&mut buf).unwrap();
            assert!(packet.len <= max);
        }
    }

    #[test]
    fn test_send_servo() {
        let mut node = ready(NodeConfig::new(SensorTypeId::SERVO));
        node.update_reading(Reading::Servo(ServoReading::new([1500, 600]).unwrap()))
            .unwrap();
        let mut buf = [0u8; MAX_PAYLOAD_LEN];
        assert_eq!(node.send(&mut buf), Ok(Packet::data(4)));
        assert_eq!(&buf[..4], &[0xDC, 0x05, 0x58, 0x02]);
    }
}
