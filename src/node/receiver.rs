// src/node/receiver.rs

use super::Node;
use crate::common::{Directive, Incoming, Received, SmartSensorError};

impl Node {
    /// Consumes one complete, already de-framed packet.
    ///
    /// Only `buf[..len]` is looked at, and only after `len` has been checked
    /// against both `buf` and the configured payload limit. The in-band flag
    /// picks exactly one interpretation: DATA goes to the active type's decoder,
    /// CONTROL is parsed as a [`Directive`]. On any error the runtime state is
    /// left untouched.
    pub fn receive(&mut self, buf: &[u8], len: u8, inband: u8) -> Result<Received, SmartSensorError> {
        if !self.initialized {
            tracing::warn!("receive before initialize");
            return Err(SmartSensorError::NotInitialized);
        }

        let len = len as usize;
        let max = self.config.max_payload_len();
        if len > buf.len() || len > max {
            self.diagnostics.rejected_packets = self.diagnostics.rejected_packets.wrapping_add(1);
            return Err(SmartSensorError::LengthOutOfBounds { len, buffer: buf.len(), max });
        }

        let incoming = Incoming::parse(&buf[..len], inband).inspect_err(|e| {
            tracing::warn!("rejected packet: {}", e);
            self.diagnostics.rejected_packets = self.diagnostics.rejected_packets.wrapping_add(1);
        })?;

        match incoming {
            Incoming::Data([]) => Ok(Received::Empty),
            Incoming::Data(payload) => self.receive_data(payload),
            Incoming::Control(directive) => self.apply_directive(directive),
        }
    }

    fn receive_data(&mut self, payload: &[u8]) -> Result<Received, SmartSensorError> {
        let active = self.active;
        let Some(desc) = self.registry.get_mut(active) else {
            tracing::debug!("ignoring data for unregistered type {}", active);
            return Err(SmartSensorError::UnsupportedType(active));
        };

        match desc.decode(payload) {
            Ok(reading) => {
                // Whole-value replace. The host already has this reading, so
                // there is nothing pending to echo back.
                desc.state.reading = Some(reading);
                desc.state.pending = false;
                tracing::debug!("decoded {} bytes for type {}", payload.len(), active);
                Ok(Received::Updated)
            }
            Err(e) => {
                tracing::warn!("decode failed for type {}: {}", active, e);
                self.diagnostics.decode_errors = self.diagnostics.decode_errors.wrapping_add(1);
                Err(e.into())
            }
        }
    }

    fn apply_directive(&mut self, directive: Directive) -> Result<Received, SmartSensorError> {
        let active = self.active;
        match directive {
            Directive::NoNewData | Directive::Unsupported(_) => {}
            Directive::Reinit => {
                let desc = self
                    .registry
                    .get_mut(active)
                    .ok_or(SmartSensorError::UnsupportedType(active))?;
                desc.state.reset();
                tracing::info!("type {} state reset by host", active);
            }
            Directive::SelectType(id) => {
                if !self.registry.contains(id) {
                    tracing::warn!("host selected unknown type {}", id);
                    return Err(SmartSensorError::UnsupportedType(id));
                }
                self.active = id;
                tracing::info!("active type switched to {}", id);
            }
            Directive::Resend => {
                let desc = self
                    .registry
                    .get_mut(active)
                    .ok_or(SmartSensorError::UnsupportedType(active))?;
                if desc.state.reading.is_some() {
                    desc.state.pending = true;
                }
            }
        }
        Ok(Received::Control(directive))
    }
}
