// src/node/shared.rs

//! A [`Node`] shared between a transmit-ready and a receive-complete context.
//!
//! Each access runs inside one `critical_section::with` call, so interrupts
//! are masked for exactly one bounded operation and no atomic read-modify-write
//! is needed. The firmware links the critical-section implementation for its
//! platform. A re-entrant access while the node is already borrowed gets
//! `nb::Error::WouldBlock` immediately instead of waiting.

use core::cell::RefCell;
use core::convert::Infallible;

use critical_section::Mutex;

use super::Node;
use crate::common::{Packet, Received, SmartSensorError};

pub struct SharedNode {
    node: Mutex<RefCell<Node>>,
}

impl SharedNode {
    /// Wraps a node. `const` so it can back a `static`.
    pub const fn new(node: Node) -> Self {
        SharedNode { node: Mutex::new(RefCell::new(node)) }
    }

    /// Runs `f` with exclusive access to the node, or returns `WouldBlock`
    /// if the node is already borrowed further up the call stack.
    pub fn try_with<R>(&self, f: impl FnOnce(&mut Node) -> R) -> nb::Result<R, Infallible> {
        critical_section::with(|cs| match self.node.borrow(cs).try_borrow_mut() {
            Ok(mut node) => Ok(f(&mut node)),
            Err(_) => Err(nb::Error::WouldBlock),
        })
    }

    pub fn try_initialize(&self) -> nb::Result<(), Infallible> {
        self.try_with(Node::initialize)
    }

    pub fn try_send(&self, out: &mut [u8]) -> nb::Result<Packet, SmartSensorError> {
        match self.try_with(|node| node.send(out)) {
            Ok(result) => result.map_err(nb::Error::Other),
            Err(_) => Err(nb::Error::WouldBlock),
        }
    }

    pub fn try_receive(&self, buf: &[u8], len: u8, inband: u8) -> nb::Result<Received, SmartSensorError> {
        match self.try_with(|node| node.receive(buf, len, inband)) {
            Ok(result) => result.map_err(nb::Error::Other),
            Err(_) => Err(nb::Error::WouldBlock),
        }
    }

    pub fn into_inner(self) -> Node {
        self.node.into_inner().into_inner()
    }
}
