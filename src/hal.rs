// src/hal.rs

//! Glue between the digital sensor type and `embedded-hal` pins.
//!
//! Requires the `impl-native` feature.

use core::fmt::Debug;

use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::common::SmartSensorError;
use crate::node::Node;
use crate::types::digital::DIGITAL_CHANNELS;
use crate::types::{DigitalReading, Reading};

const CHANNELS: usize = DIGITAL_CHANNELS as usize;

#[derive(Debug, thiserror::Error)]
pub enum PinError<E>
where
    E: Debug,
{
    /// Underlying pin error from the HAL implementation.
    #[error("pin I/O error: {0:?}")]
    Io(E),

    #[error(transparent)]
    Node(#[from] SmartSensorError),
}

/// Four switch inputs sampled into a [`DigitalReading`].
pub struct DigitalInputs<I> {
    pins: [I; CHANNELS],
    last: Option<DigitalReading>,
}

impl<I> DigitalInputs<I>
where
    I: InputPin,
{
    pub fn new(pins: [I; CHANNELS]) -> Self {
        DigitalInputs { pins, last: None }
    }

    /// Reads all pins. Channel `i` is high when pin `i` is high.
    pub fn sample(&mut self) -> Result<DigitalReading, I::Error> {
        let mut reading = DigitalReading::default();
        for (channel, pin) in self.pins.iter_mut().enumerate() {
            reading.set_channel(channel as u8, pin.is_high()?);
        }
        Ok(reading)
    }

    /// Samples the pins and publishes the reading to `node` if it changed
    /// since the last publish. Returns whether a new reading was published.
    pub fn poll(&mut self, node: &mut Node) -> Result<bool, PinError<I::Error>> {
        let reading = self.sample().map_err(PinError::Io)?;
        if self.last == Some(reading) {
            return Ok(false);
        }
        node.update_reading(Reading::Digital(reading))?;
        self.last = Some(reading);
        Ok(true)
    }
}

/// Four outputs driven from the active digital reading.
pub struct DigitalOutputs<O> {
    pins: [O; CHANNELS],
}

impl<O> DigitalOutputs<O>
where
    O: OutputPin,
{
    pub fn new(pins: [O; CHANNELS]) -> Self {
        DigitalOutputs { pins }
    }

    pub fn apply(&mut self, reading: &DigitalReading) -> Result<(), O::Error> {
        for (channel, pin) in self.pins.iter_mut().enumerate() {
            let on = reading.channel(channel as u8).unwrap_or(false);
            pin.set_state(PinState::from(on))?;
        }
        Ok(())
    }

    /// Drives the pins from the node's current reading, if it is a digital one.
    /// Returns whether anything was applied.
    pub fn apply_from(&mut self, node: &Node) -> Result<bool, O::Error> {
        match node.reading() {
            Some(Reading::Digital(reading)) => self.apply(&reading).map(|_| true),
            _ => Ok(false),
        }
    }
}
