// src/types/analog.rs

use super::Reading;
use crate::common::{CodecError, DecodedBuffer};

pub const MAX_ANALOG_CHANNELS: usize = 4;

/// One to four raw ADC samples.
///
/// Wire form: count byte `n`, then `n` little-endian `u16` samples.
/// Unused sample slots are kept at zero so equality only sees live channels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AnalogReading {
    count: u8,
    samples: [u16; MAX_ANALOG_CHANNELS],
}

impl AnalogReading {
    pub fn new(samples: &[u16]) -> Result<Self, CodecError> {
        if samples.is_empty() || samples.len() > MAX_ANALOG_CHANNELS {
            return Err(CodecError::ChannelCount(samples.len().min(u8::MAX as usize) as u8));
        }
        let mut out = [0u16; MAX_ANALOG_CHANNELS];
        out[..samples.len()].copy_from_slice(samples);
        Ok(Self { count: samples.len() as u8, samples: out })
    }

    pub fn samples(&self) -> &[u16] {
        &self.samples[..self.count as usize]
    }

    /// Bytes this reading occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        1 + 2 * self.count as usize
    }
}

impl Default for AnalogReading {
    fn default() -> Self {
        Self { count: 1, samples: [0; MAX_ANALOG_CHANNELS] }
    }
}

pub(crate) fn encode(reading: &Reading, out: &mut DecodedBuffer) -> Result<(), CodecError> {
    let Reading::Analog(a) = reading else {
        return Err(CodecError::WrongReading);
    };
    if out.remaining_capacity() < a.encoded_len() {
        return Err(CodecError::Overflow);
    }
    out.try_push(a.count).map_err(|_| CodecError::Overflow)?;
    for sample in a.samples() {
        out.try_extend_from_slice(&sample.to_le_bytes())
            .map_err(|_| CodecError::Overflow)?;
    }
    Ok(())
}

pub(crate) fn decode(payload: &[u8]) -> Result<Reading, CodecError> {
    let Some((&count, body)) = payload.split_first() else {
        return Err(CodecError::BadLength { expected: 3, got: 0 });
    };
    if count == 0 || count as usize > MAX_ANALOG_CHANNELS {
        return Err(CodecError::ChannelCount(count));
    }
    let expected = 1 + 2 * count as usize;
    if payload.len() != expected {
        return Err(CodecError::BadLength { expected, got: payload.len() });
    }

    let mut samples = [0u16; MAX_ANALOG_CHANNELS];
    for (slot, chunk) in samples.iter_mut().zip(body.chunks_exact(2)) {
        *slot = u16::from_le_bytes([chunk[0], chunk[1]]);
    }
    Ok(Reading::Analog(AnalogReading { count, samples }))
}
