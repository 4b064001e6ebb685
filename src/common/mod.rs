// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod config;
pub mod error;
pub mod inband;
pub mod packet;
pub mod protocol;

// --- Re-export key types for easier access ---

pub use config::NodeConfig;

pub use error::{CodecError, DirectiveError, RegistryError, SmartSensorError};

pub use inband::{Directive, InBand, Incoming};

pub use packet::{DecodedBuffer, Packet, Received};

// Constants stay namespaced (common::protocol::*), except the payload limit.
pub use protocol::MAX_PAYLOAD_LEN;
