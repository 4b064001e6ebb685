// src/types/digital.rs

//! Digital switch sensor: up to four on/off channels packed in one byte.

use super::Reading;
use crate::common::{CodecError, DecodedBuffer};

pub const DIGITAL_CHANNELS: u8 = 4;
pub const DIGITAL_PAYLOAD_LEN: usize = 1;

const CHANNEL_MASK: u8 = (1 << DIGITAL_CHANNELS) - 1;

/// Bit `i` holds channel `i`. Upper bits are always clear.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct DigitalReading(u8);

impl DigitalReading {
    /// Builds a reading from a channel bitmap. Bits above channel 3 are rejected.
    pub fn from_bits(bits: u8) -> Result<Self, CodecError> {
        if bits & !CHANNEL_MASK != 0 {
            return Err(CodecError::ReservedBits(bits & !CHANNEL_MASK));
        }
        Ok(Self(bits))
    }

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Returns the state of `channel`, or `None` past the last channel.
    pub fn channel(&self, channel: u8) -> Option<bool> {
        (channel < DIGITAL_CHANNELS).then(|| self.0 & (1 << channel) != 0)
    }

    /// Sets `channel`. Out-of-range channels are ignored.
    pub fn set_channel(&mut self, channel: u8, on: bool) {
        if channel >= DIGITAL_CHANNELS {
            return;
        }
        if on {
            self.0 |= 1 << channel;
        } else {
            self.0 &= !(1 << channel);
        }
    }
}

pub(crate) fn encode(reading: &Reading, out: &mut DecodedBuffer) -> Result<(), CodecError> {
    let Reading::Digital(d) = reading else {
        return Err(CodecError::WrongReading);
    };
    out.try_push(d.bits()).map_err(|_| CodecError::Overflow)
}

pub(crate) fn decode(payload: &[u8]) -> Result<Reading, CodecError> {
    match payload {
        [bits] => Ok(Reading::Digital(DigitalReading::from_bits(*bits)?)),
        _ => Err(CodecError::BadLength { expected: DIGITAL_PAYLOAD_LEN, got: payload.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels() {
        let mut d = DigitalReading::default();
        d.set_channel(0, true);
        d.set_channel(3, true);
        d.set_channel(7, true); // ignored
        assert_eq!(d.bits(), 0b1001);
        assert_eq!(d.channel(0), Some(true));
        assert_eq!(d.channel(1), Some(false));
        assert_eq!(d.channel(4), None);
        d.set_channel(0, false);
        assert_eq!(d.bits(), 0b1000);
    }

    #[test]
    fn test_encode_decode() {
        for bits in 0..=CHANNEL_MASK {
            let reading = Reading::Digital(DigitalReading::from_bits(bits).unwrap());
            let mut buf = DecodedBuffer::new();
            encode(&reading, &mut buf).unwrap();
            assert_eq!(buf.as_slice(), &[bits]);
            assert_eq!(decode(&buf), Ok(reading));
        }
    }

    #[test]
    fn test_decode_rejects() {
        assert_eq!(decode(&[]), Err(CodecError::BadLength { expected: 1, got: 0 }));
        assert_eq!(decode(&[1, 2]), Err(CodecError::BadLength { expected: 1, got: 2 }));
        assert_eq!(decode(&[0x31]), Err(CodecError::ReservedBits(0x30)));
    }

    #[test]
    fn test_encode_wrong_reading() {
        let mut buf = DecodedBuffer::new();
        let other = Reading::Servo(Default::default());
        assert_eq!(encode(&other, &mut buf), Err(CodecError::WrongReading));
        assert!(buf.is_empty());
    }
}
