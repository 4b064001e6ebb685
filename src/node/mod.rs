// src/node/mod.rs

//! The sensor node context: registry, active type and diagnostics in one
//! owned struct that both the send and receive paths borrow mutably.

pub mod api;
mod receiver;
mod sender;
pub mod shared;

pub use shared::SharedNode;

use crate::common::{CodecError, NodeConfig, SmartSensorError};
use crate::registry::{Registry, SensorTypeId, TypeState};
use crate::types::Reading;

/// Error counters for traffic that was rejected or failed to (de)code.
/// All counters wrap.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Diagnostics {
    pub decode_errors: u16,
    pub encode_errors: u16,
    pub rejected_packets: u16,
}

impl Diagnostics {
    pub const ZERO: Diagnostics = Diagnostics { decode_errors: 0, encode_errors: 0, rejected_packets: 0 };
}

#[derive(Debug, Clone)]
pub struct Node {
    config: NodeConfig,
    registry: Registry,
    active: SensorTypeId,
    initialized: bool,
    diagnostics: Diagnostics,
}

impl Node {
    /// A node with an empty registry. Nothing works until types are
    /// registered and `initialize` has run.
    pub const fn new(config: NodeConfig) -> Self {
        Node {
            config,
            registry: Registry::new(),
            active: config.active_type,
            initialized: false,
            diagnostics: Diagnostics::ZERO,
        }
    }

    /// A node with the built-in codecs registered. Still needs `initialize`.
    pub fn with_builtin_types(config: NodeConfig) -> Self {
        Node { registry: Registry::with_builtin_types(), ..Self::new(config) }
    }

    /// Resets all per-type state, selects the configured active type and
    /// opens the node for `send`/`receive`. Running it again repeats the reset.
    pub fn initialize(&mut self) {
        self.registry.reset_states();
        self.active = self.config.active_type;
        self.diagnostics = Diagnostics::ZERO;
        self.initialized = true;

        if self.registry.contains(self.active) {
            tracing::info!("smart sensor initialized as type {}", self.active);
        } else {
            tracing::warn!("active sensor type {} has no codec registered", self.active);
        }
    }

    /// Publishes a fresh reading from the sensing side and marks it pending.
    pub fn update_reading(&mut self, reading: Reading) -> Result<(), SmartSensorError> {
        if !self.initialized {
            return Err(SmartSensorError::NotInitialized);
        }
        let active = self.active;
        let max = self.config.max_payload_len();
        let desc = self
            .registry
            .get_mut(active)
            .ok_or(SmartSensorError::UnsupportedType(active))?;

        // The encoder is the authority on which readings its type accepts.
        // A reading the transport can never carry would stay pending forever.
        match desc.encode(&reading) {
            Ok(payload) if payload.len() > max => {
                return Err(SmartSensorError::Encode(CodecError::Overflow))
            }
            Ok(_) => {}
            Err(CodecError::WrongReading) => return Err(SmartSensorError::ReadingMismatch(active)),
            Err(e) => return Err(SmartSensorError::Encode(e)),
        }

        desc.state.reading = Some(reading);
        desc.state.pending = true;
        Ok(())
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    #[inline]
    pub fn active_type(&self) -> SensorTypeId {
        self.active
    }

    #[inline]
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable registry access, for adding firmware-specific types.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Runtime state of the active type, if it is registered.
    pub fn state(&self) -> Option<&TypeState> {
        self.state_of(self.active)
    }

    pub fn state_of(&self, id: SensorTypeId) -> Option<&TypeState> {
        self.registry.get(id).map(|d| d.state())
    }

    /// Last known reading of the active type.
    pub fn reading(&self) -> Option<Reading> {
        self.state().and_then(|s| s.reading)
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::with_builtin_types(NodeConfig::DEFAULT)
    }
}
