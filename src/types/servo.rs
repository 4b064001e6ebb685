// src/types/servo.rs

use super::Reading;
use crate::common::{CodecError, DecodedBuffer};

pub const SERVO_CHANNELS: usize = 2;
pub const SERVO_PAYLOAD_LEN: usize = 2 * SERVO_CHANNELS;

/// Accepted pulse width range in microseconds.
pub const PULSE_MIN_US: u16 = 500;
pub const PULSE_MAX_US: u16 = 2500;
/// Neutral position.
pub const PULSE_CENTER_US: u16 = 1500;

/// Pulse widths for a two-channel servo output, little-endian `u16` each on the wire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ServoReading {
    pulse_us: [u16; SERVO_CHANNELS],
}

impl ServoReading {
    pub fn new(pulse_us: [u16; SERVO_CHANNELS]) -> Result<Self, CodecError> {
        for (channel, &value) in pulse_us.iter().enumerate() {
            if !(PULSE_MIN_US..=PULSE_MAX_US).contains(&value) {
                return Err(CodecError::OutOfRange { channel: channel as u8, value });
            }
        }
        Ok(Self { pulse_us })
    }

    pub fn pulse_us(&self) -> [u16; SERVO_CHANNELS] {
        self.pulse_us
    }
}

impl Default for ServoReading {
    fn default() -> Self {
        Self { pulse_us: [PULSE_CENTER_US; SERVO_CHANNELS] }
    }
}

pub(crate) fn encode(reading: &Reading, out: &mut DecodedBuffer) -> Result<(), CodecError> {
    let Reading::Servo(s) = reading else {
        return Err(CodecError::WrongReading);
    };
    let mut bytes = [0u8; SERVO_PAYLOAD_LEN];
    for (chunk, pulse) in bytes.chunks_exact_mut(2).zip(s.pulse_us) {
        chunk.copy_from_slice(&pulse.to_le_bytes());
    }
    out.try_extend_from_slice(&bytes).map_err(|_| CodecError::Overflow)
}

pub(crate) fn decode(payload: &[u8]) -> Result<Reading, CodecError> {
    if payload.len() != SERVO_PAYLOAD_LEN {
        return Err(CodecError::BadLength { expected: SERVO_PAYLOAD_LEN, got: payload.len() });
    }
    let mut pulse_us = [0u16; SERVO_CHANNELS];
    for (slot, chunk) in pulse_us.iter_mut().zip(payload.chunks_exact(2)) {
        *slot = u16::from_le_bytes([chunk[0], chunk[1]]);
    }
    ServoReading::new(pulse_us).map(Reading::Servo)
}
