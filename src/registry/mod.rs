// src/registry/mod.rs

//! Table of sensor types known to this node.
//!
//! Each entry is a `{encode, decode, state}` triple keyed by [`SensorTypeId`].
//! Dispatch is a linear scan over at most [`MAX_SENSOR_TYPES`] rows, so lookups
//! stay bounded and allocation-free.

mod descriptor;

pub use descriptor::{DecodeFn, EncodeFn, SensorTypeId, TypeDescriptor, TypeState};

use heapless::Vec;

use crate::common::protocol::MAX_SENSOR_TYPES;
use crate::common::RegistryError;
use crate::types::builtin_descriptors;

#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<TypeDescriptor, MAX_SENSOR_TYPES>,
}

impl Registry {
    /// An empty registry; usable in `static` initializers.
    pub const fn new() -> Self {
        Registry { entries: Vec::new() }
    }

    /// A registry holding the digital, analog and servo codecs.
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        // An empty table always has room for the built-ins.
        if let Err(e) = registry.register_builtin_types() {
            tracing::error!("built-in types not registered: {}", e);
        }
        registry
    }

    /// Adds the built-in codecs, skipping any id that is already taken.
    /// Fails with `Full` if the table runs out of rows; built-ins added
    /// before that point stay registered.
    pub fn register_builtin_types(&mut self) -> Result<(), RegistryError> {
        for desc in builtin_descriptors() {
            if self.contains(desc.id()) {
                continue;
            }
            self.register(desc)?;
        }
        Ok(())
    }

    /// Adds a descriptor. Ids must be unique.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Result<(), RegistryError> {
        let id = descriptor.id();
        if self.contains(id) {
            return Err(RegistryError::Duplicate(id));
        }
        self.entries.push(descriptor).map_err(|_| RegistryError::Full)?;
        tracing::debug!("registered sensor type {}", id);
        Ok(())
    }

    pub fn contains(&self, id: SensorTypeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: SensorTypeId) -> Option<&TypeDescriptor> {
        self.entries.iter().find(|d| d.id() == id)
    }

    pub fn get_mut(&mut self, id: SensorTypeId) -> Option<&mut TypeDescriptor> {
        self.entries.iter_mut().find(|d| d.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Puts every type's runtime state back to "no reading yet".
    pub fn reset_states(&mut self) {
        for desc in self.entries.iter_mut() {
            desc.state.reset();
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
