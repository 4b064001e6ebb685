// src/common/inband.rs

use super::error::{DirectiveError, SmartSensorError};
use super::protocol::{
    INBAND_CONTROL, INBAND_DATA, OP_REINIT, OP_RESEND, OP_SELECT_TYPE, OP_UNSUPPORTED,
};
use crate::registry::SensorTypeId;

/// How a packet on the shared channel is to be interpreted.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum InBand {
    /// Sensor data for the active type's codec.
    Data = INBAND_DATA,
    /// Control signaling carried on the same channel.
    Control = INBAND_CONTROL,
}

impl InBand {
    /// Tries to convert a flag byte into an `InBand`.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            INBAND_DATA => Some(InBand::Data),
            INBAND_CONTROL => Some(InBand::Control),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<InBand> for u8 {
    fn from(value: InBand) -> Self {
        value.as_u8()
    }
}

/// A control directive carried in a CONTROL packet.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Directive {
    /// Empty control packet: nothing new to report.
    NoNewData,
    /// Reset the active type's runtime state to its default.
    Reinit,
    /// Make another registered type the active one.
    SelectType(SensorTypeId),
    /// Mark the current reading pending again.
    Resend,
    /// The named type has no codec on the sending node.
    Unsupported(SensorTypeId),
}

impl Directive {
    /// Parses a CONTROL payload. The whole slice must be consumed.
    pub fn parse(payload: &[u8]) -> Result<Self, DirectiveError> {
        let Some((&opcode, rest)) = payload.split_first() else {
            return Ok(Directive::NoNewData);
        };

        let expect = |n: usize| {
            if rest.len() == n {
                Ok(())
            } else {
                Err(DirectiveError::BadLength { opcode, expected: n + 1, got: payload.len() })
            }
        };

        match opcode {
            OP_REINIT => expect(0).map(|_| Directive::Reinit),
            OP_RESEND => expect(0).map(|_| Directive::Resend),
            OP_SELECT_TYPE => expect(1).map(|_| Directive::SelectType(SensorTypeId(rest[0]))),
            OP_UNSUPPORTED => expect(1).map(|_| Directive::Unsupported(SensorTypeId(rest[0]))),
            other => Err(DirectiveError::UnknownOpcode(other)),
        }
    }

    /// Number of payload bytes `write_into` produces.
    pub const fn encoded_len(&self) -> usize {
        match self {
            Directive::NoNewData => 0,
            Directive::Reinit | Directive::Resend => 1,
            Directive::SelectType(_) | Directive::Unsupported(_) => 2,
        }
    }

    /// Writes the directive into `out`, returning the number of bytes used.
    /// Nothing is written if `out` is too short.
    pub fn write_into(&self, out: &mut [u8]) -> Result<usize, SmartSensorError> {
        let needed = self.encoded_len();
        if out.len() < needed {
            return Err(SmartSensorError::BufferTooSmall { needed, got: out.len() });
        }
        match *self {
            Directive::NoNewData => {}
            Directive::Reinit => out[0] = OP_REINIT,
            Directive::Resend => out[0] = OP_RESEND,
            Directive::SelectType(id) => {
                out[0] = OP_SELECT_TYPE;
                out[1] = id.as_u8();
            }
            Directive::Unsupported(id) => {
                out[0] = OP_UNSUPPORTED;
                out[1] = id.as_u8();
            }
        }
        Ok(needed)
    }
}

/// A received payload after the in-band flag has been applied.
///
/// This is the only place the flag byte is looked at; everything past this
/// point matches on the variant.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Incoming<'a> {
    Data(&'a [u8]),
    Control(Directive),
}

impl<'a> Incoming<'a> {
    /// Classifies an already length-checked payload by its flag byte.
    pub fn parse(payload: &'a [u8], inband: u8) -> Result<Self, SmartSensorError> {
        match InBand::from_u8(inband) {
            Some(InBand::Data) => Ok(Incoming::Data(payload)),
            Some(InBand::Control) => Ok(Incoming::Control(Directive::parse(payload)?)),
            None => Err(SmartSensorError::InvalidInBand(inband)),
        }
    }

    pub fn inband(&self) -> InBand {
        match self {
            Incoming::Data(_) => InBand::Data,
            Incoming::Control(_) => InBand::Control,
        }
    }
}
