//! Immutable event records handed to the host for injection.
//!
//! Records mirror the composite digitizer event layout of real touch
//! hardware: one hand- or stylus-level event carrying per-contact samples,
//! plus single keyboard and vendor-defined marker events. All records are
//! serde-serializable so test logs can be snapshotted.

use crate::keys::KeyboardKey;
use crate::touch::{DigitizerEventMask, FingerIndex};
use crate::types::Point;
use serde::{Deserialize, Serialize};

/// HID usage page for keyboard events.
pub const KEYBOARD_USAGE_PAGE: u32 = 0x07;

/// HID usage page for the delivery-acknowledgment marker events. Vendor
/// pages start at 0xFF00; the offset keeps markers clear of other vendor
/// events a host might emit.
pub const MARKER_USAGE_PAGE: u32 = 0xFF00 + 100;

/// The kind of digitizer that produced a composite event.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TransducerType {
    Hand,
    Stylus,
}

/// One contact's sample inside a composite digitizer event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TransducerSample {
    Finger {
        identifier: u32,
        finger_id: u32,
        mask: DigitizerEventMask,
        location: Point,
        pressure: f64,
        twist: f64,
        major_radius: f64,
        minor_radius: f64,
        is_touching: bool,
    },
    Stylus {
        identifier: u32,
        mask: DigitizerEventMask,
        location: Point,
        /// Wire pressure, scaled from the caller's [0, 1] range.
        pressure: f64,
        twist: f64,
        /// Wire altitude: π minus the caller's altitude.
        altitude: f64,
        /// Wire azimuth: 2π minus the caller's azimuth.
        azimuth: f64,
        is_touching: bool,
    },
}

impl TransducerSample {
    pub fn identifier(&self) -> u32 {
        match self {
            TransducerSample::Finger { identifier, .. }
            | TransducerSample::Stylus { identifier, .. } => *identifier,
        }
    }

    pub fn location(&self) -> Point {
        match self {
            TransducerSample::Finger { location, .. }
            | TransducerSample::Stylus { location, .. } => *location,
        }
    }

    pub fn is_touching(&self) -> bool {
        match self {
            TransducerSample::Finger { is_touching, .. }
            | TransducerSample::Stylus { is_touching, .. } => *is_touching,
        }
    }
}

/// A composite hand or stylus event: the unit of delivery to the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DigitizerEvent {
    /// Monotonic hardware timestamp in nanoseconds.
    pub timestamp: u64,
    /// Fixed nonzero sender identifier for the generator instance.
    pub sender_id: u64,
    pub transducer: TransducerType,
    pub mask: DigitizerEventMask,
    pub is_touching: bool,
    /// Integrated displays report their digitizer as built in.
    pub display_integrated: bool,
    pub samples: Vec<TransducerSample>,
}

impl DigitizerEvent {
    /// The finger indices touched by this event, in sample order.
    pub fn finger_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.samples.iter().filter_map(|sample| match sample {
            TransducerSample::Finger { finger_id, .. } => Some(*finger_id),
            TransducerSample::Stylus { .. } => None,
        })
    }

    pub fn sample_for_finger(&self, index: FingerIndex) -> Option<&TransducerSample> {
        self.samples.iter().find(|sample| match sample {
            TransducerSample::Finger { finger_id, .. } => *finger_id == index.raw(),
            TransducerSample::Stylus { .. } => false,
        })
    }
}

/// A single key transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardEvent {
    pub timestamp: u64,
    pub sender_id: u64,
    pub usage_page: u32,
    pub key: KeyboardKey,
    pub is_down: bool,
}

/// A content-free vendor event used to detect, via its echo, that the host
/// has processed everything injected before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerEvent {
    pub timestamp: u64,
    pub sender_id: u64,
    pub usage_page: u32,
    pub correlation_id: u32,
}

/// Any event the generator can hand to the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Digitizer(DigitizerEvent),
    Keyboard(KeyboardEvent),
    Marker(MarkerEvent),
}

impl InputEvent {
    pub fn timestamp(&self) -> u64 {
        match self {
            InputEvent::Digitizer(event) => event.timestamp,
            InputEvent::Keyboard(event) => event.timestamp,
            InputEvent::Marker(event) => event.timestamp,
        }
    }

    pub fn as_digitizer(&self) -> Option<&DigitizerEvent> {
        match self {
            InputEvent::Digitizer(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_keyboard(&self) -> Option<&KeyboardEvent> {
        match self {
            InputEvent::Keyboard(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_marker(&self) -> Option<&MarkerEvent> {
        match self {
            InputEvent::Marker(event) => Some(event),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::touch::TouchPhase;

    fn sample_event() -> DigitizerEvent {
        DigitizerEvent {
            timestamp: 42,
            sender_id: 0x0000_0001_2345_6789,
            transducer: TransducerType::Hand,
            mask: TouchPhase::Began.event_mask()
                & (DigitizerEventMask::TOUCH | DigitizerEventMask::ATTRIBUTE),
            is_touching: true,
            display_integrated: true,
            samples: vec![TransducerSample::Finger {
                identifier: 1,
                finger_id: FingerIndex::RightThumb.raw(),
                mask: TouchPhase::Began.event_mask(),
                location: Point::new(100.0, 100.0),
                pressure: 0.0,
                twist: 0.0,
                major_radius: 5.0,
                minor_radius: 5.0,
                is_touching: true,
            }],
        }
    }

    #[test]
    fn finger_ids_are_exposed_in_sample_order() {
        let event = sample_event();
        assert_eq!(event.finger_ids().collect::<Vec<_>>(), vec![1]);
        assert!(event.sample_for_finger(FingerIndex::RightThumb).is_some());
        assert!(event.sample_for_finger(FingerIndex::LeftThumb).is_none());
    }

    #[test]
    fn records_round_trip_through_serde() {
        let event = InputEvent::Digitizer(sample_event());
        let json = serde_json::to_string(&event).unwrap();
        let back: InputEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
