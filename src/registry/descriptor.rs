// src/registry/descriptor.rs

use core::fmt;

use crate::common::{CodecError, DecodedBuffer};
use crate::types::Reading;

/// Serializes a reading into its wire bytes. Must either push a complete
/// payload or return an error; the caller discards partial output.
pub type EncodeFn = fn(&Reading, &mut DecodedBuffer) -> Result<(), CodecError>;

/// Parses a complete payload into a fresh reading. Never sees runtime state,
/// so a failure cannot leave it half-written.
pub type DecodeFn = fn(&[u8]) -> Result<Reading, CodecError>;

/// Identifier of a sensor variant as it appears on the bus.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct SensorTypeId(pub u8);

impl SensorTypeId {
    pub const DIGITAL: SensorTypeId = SensorTypeId(0x00);
    pub const ANALOG: SensorTypeId = SensorTypeId(0x01);
    pub const SERVO: SensorTypeId = SensorTypeId(0x02);

    #[inline]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }
}

impl From<u8> for SensorTypeId {
    fn from(value: u8) -> Self {
        SensorTypeId(value)
    }
}

impl From<SensorTypeId> for u8 {
    fn from(value: SensorTypeId) -> Self {
        value.0
    }
}

impl fmt::Display for SensorTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// Mutable per-type state shared by the send and receive paths.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct TypeState {
    /// Last known reading, `None` until one is produced or received.
    pub reading: Option<Reading>,
    /// Set when `reading` has not been transmitted yet.
    pub pending: bool,
}

impl TypeState {
    pub const EMPTY: TypeState = TypeState { reading: None, pending: false };

    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }
}

/// One row of the registry: a type id with its codec and state.
#[derive(Clone)]
pub struct TypeDescriptor {
    id: SensorTypeId,
    name: &'static str,
    encode: EncodeFn,
    decode: DecodeFn,
    pub(crate) state: TypeState,
}

impl TypeDescriptor {
    pub const fn new(
        id: SensorTypeId,
        name: &'static str,
        encode: EncodeFn,
        decode: DecodeFn,
    ) -> Self {
        TypeDescriptor { id, name, encode, decode, state: TypeState::EMPTY }
    }

    #[inline]
    pub fn id(&self) -> SensorTypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn state(&self) -> &TypeState {
        &self.state
    }

    /// Runs the encode handler into a scratch buffer; only a fully encoded
    /// payload is returned.
    pub fn encode(&self, reading: &Reading) -> Result<DecodedBuffer, CodecError> {
        let mut scratch = DecodedBuffer::new();
        (self.encode)(reading, &mut scratch)?;
        Ok(scratch)
    }

    pub fn decode(&self, payload: &[u8]) -> Result<Reading, CodecError> {
        (self.decode)(payload)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("state", &self.state)
            .finish()
    }
}
