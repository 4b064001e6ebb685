// src/types/mod.rs

// Built-in sensor type codecs. Each module exposes a reading type plus a
// matching `encode`/`decode` pair that the registry stores as fn pointers.
pub mod analog;
pub mod digital;
pub mod servo;

pub use analog::AnalogReading;
pub use digital::DigitalReading;
pub use servo::ServoReading;

use crate::registry::{SensorTypeId, TypeDescriptor};

/// Logical (non-wire) value held in a sensor type's runtime state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Reading {
    Digital(DigitalReading),
    Analog(AnalogReading),
    Servo(ServoReading),
}

impl Reading {
    /// The built-in type this reading belongs to.
    pub fn type_id(&self) -> SensorTypeId {
        match self {
            Reading::Digital(_) => SensorTypeId::DIGITAL,
            Reading::Analog(_) => SensorTypeId::ANALOG,
            Reading::Servo(_) => SensorTypeId::SERVO,
        }
    }
}

impl From<DigitalReading> for Reading {
    fn from(value: DigitalReading) -> Self {
        Reading::Digital(value)
    }
}

impl From<AnalogReading> for Reading {
    fn from(value: AnalogReading) -> Self {
        Reading::Analog(value)
    }
}

impl From<ServoReading> for Reading {
    fn from(value: ServoReading) -> Self {
        Reading::Servo(value)
    }
}

/// Descriptors for every codec shipped with the crate.
pub fn builtin_descriptors() -> [TypeDescriptor; 3] {
    [
        TypeDescriptor::new(SensorTypeId::DIGITAL, "digital", digital::encode, digital::decode),
        TypeDescriptor::new(SensorTypeId::ANALOG, "analog", analog::encode, analog::decode),
        TypeDescriptor::new(SensorTypeId::SERVO, "servo", servo::encode, servo::decode),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_type_ids() {
        assert_eq!(Reading::from(DigitalReading::default()).type_id(), SensorTypeId::DIGITAL);
        assert_eq!(Reading::from(AnalogReading::default()).type_id(), SensorTypeId::ANALOG);
        assert_eq!(Reading::from(ServoReading::default()).type_id(), SensorTypeId::SERVO);
    }

    #[test]
    fn test_builtin_ids_unique() {
        let d = builtin_descriptors();
        assert_ne!(d[0].id(), d[1].id());
        assert_ne!(d[1].id(), d[2].id());
        assert_ne!(d[0].id(), d[2].id());
    }
}
