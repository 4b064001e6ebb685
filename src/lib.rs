// src/lib.rs

//! Active send/receive layer for smart sensor bus nodes.
//!
//! A [`Node`] owns a registry of sensor types, each a `{encode, decode, state}`
//! triple. The bus transport calls [`Node::send`] when it can transmit and
//! [`Node::receive`] when a complete packet has arrived; an in-band flag on
//! every packet separates sensor data from control signaling.

#![no_std] // Specify no_std at the crate root

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod common;
pub mod node;
pub mod registry;
pub mod types;

#[cfg(feature = "impl-native")]
pub mod hal;

// Re-export key types for convenience
pub use common::{Directive, InBand, NodeConfig, Packet, Received, SmartSensorError};
pub use node::{Node, SharedNode};
pub use registry::{Registry, SensorTypeId};
pub use types::Reading;
