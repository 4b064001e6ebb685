// src/common/protocol.rs

// Wire-level constants shared by the sender and receiver. The transport layer
// strips framing/CRC before handing payloads over, so only logical payload
// limits and control opcodes live here.

/// Largest logical payload a packet can carry. Lengths travel as a `u8`.
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize;

/// Upper bound on the number of sensor types a node can register.
pub const MAX_SENSOR_TYPES: usize = 8;

// === In-band flag bytes ===

/// Flag byte marking a sensor data packet.
pub const INBAND_DATA: u8 = 0x00;
/// Flag byte marking a control / in-band signal packet.
pub const INBAND_CONTROL: u8 = 0x01;

// === Control directive opcodes (first byte of a CONTROL payload) ===
// An empty CONTROL payload is the "no new data" heartbeat.

/// Reset the active type's runtime state.
pub const OP_REINIT: u8 = 0x01;
/// Switch the active sensor type. Followed by one type id byte.
pub const OP_SELECT_TYPE: u8 = 0x02;
/// Re-arm the last reading for transmission.
pub const OP_RESEND: u8 = 0x03;
/// Active type has no codec on this node. Followed by one type id byte.
pub const OP_UNSUPPORTED: u8 = 0x7F;
