// src/common/error.rs

use crate::registry::SensorTypeId;

/// Top-level error for the active send/receive entry points.
///
/// Every variant leaves the node's runtime state exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SmartSensorError {
    /// `send`/`receive` was called before `initialize`.
    #[error("node used before initialization")]
    NotInitialized,

    /// Declared packet length does not fit the supplied buffer or the configured maximum.
    #[error("packet length {len} out of bounds (buffer {buffer}, max {max})")]
    LengthOutOfBounds { len: usize, buffer: usize, max: usize },

    /// Output buffer is smaller than the configured maximum payload.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },

    /// In-band flag byte is neither DATA nor CONTROL.
    #[error("invalid in-band flag: {0:#04x}")]
    InvalidInBand(u8),

    /// The active sensor type has no registered codec.
    #[error("unsupported sensor type {0}")]
    UnsupportedType(SensorTypeId),

    /// Payload did not decode for the active sensor type.
    #[error("decode failed: {0}")]
    Decode(#[from] CodecError),

    /// A reading could not be encoded by the active type's codec.
    #[error("encode failed: {0}")]
    Encode(CodecError),

    /// Control packet carried an unknown or malformed directive.
    #[error("bad control directive: {0}")]
    Directive(#[from] DirectiveError),

    /// Reading variant does not belong to the active sensor type.
    #[error("reading does not match sensor type {0}")]
    ReadingMismatch(SensorTypeId),
}

/// Failure inside a per-type encode/decode handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("payload length {got} invalid, expected {expected}")]
    BadLength { expected: usize, got: usize },

    #[error("value {value} out of range for channel {channel}")]
    OutOfRange { channel: u8, value: u16 },

    #[error("reserved bits set: {0:#04x}")]
    ReservedBits(u8),

    #[error("channel count {0} not supported")]
    ChannelCount(u8),

    #[error("encode buffer overflow")]
    Overflow,

    #[error("reading belongs to another sensor type")]
    WrongReading,
}

/// Failure while interpreting a control packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    #[error("unknown directive opcode {0:#04x}")]
    UnknownOpcode(u8),

    #[error("directive {opcode:#04x} expects {expected} bytes, got {got}")]
    BadLength { opcode: u8, expected: usize, got: usize },
}

/// Failure while adding a descriptor to the type registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("sensor type {0} already registered")]
    Duplicate(SensorTypeId),

    #[error("registry full")]
    Full,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_converts() {
        let err: SmartSensorError = CodecError::ReservedBits(0xF0).into();
        assert_eq!(err, SmartSensorError::Decode(CodecError::ReservedBits(0xF0)));
    }

    #[test]
    fn test_directive_error_converts() {
        let err: SmartSensorError = DirectiveError::UnknownOpcode(0x42).into();
        assert!(matches!(err, SmartSensorError::Directive(DirectiveError::UnknownOpcode(0x42))));
    }
}
