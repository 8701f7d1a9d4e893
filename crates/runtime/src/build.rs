//! Translation of gesture intents into immutable event records.
//!
//! The derivation rules here are fixed: masks come from the phase and the
//! pressure, the physical-contact flag from the phase, and stylus samples
//! carry wire-space attribute values (scaled pressure, inverted altitude
//! and azimuth) so records match what real hardware reports.

use crate::error::GestureError;
use std::f64::consts::PI;
use tactile_core::event::{
    DigitizerEvent, KEYBOARD_USAGE_PAGE, KeyboardEvent, MARKER_USAGE_PAGE, MarkerEvent,
    TransducerSample, TransducerType,
};
use tactile_core::keys::KeyboardKey;
use tactile_core::touch::{FingerInfo, HandInfo, StylusInfo, TouchPhase};

/// Pressure multiplier from the caller's [0, 1] range to wire units.
const STYLUS_PRESSURE_SCALE: f64 = 500.0;

/// Rejects the hover-style region phases, which classic touch contacts
/// never report.
pub(crate) fn ensure_supported_phase(phase: TouchPhase) -> Result<(), GestureError> {
    match phase {
        TouchPhase::Began
        | TouchPhase::Moved
        | TouchPhase::Stationary
        | TouchPhase::Ended
        | TouchPhase::Cancelled => Ok(()),
        TouchPhase::RegionEntered | TouchPhase::RegionMoved | TouchPhase::RegionExited => {
            Err(GestureError::UnsupportedPhase { phase })
        }
    }
}

/// Builds a composite hand event from finger updates and their resolved
/// contact identifiers (parallel slices).
pub(crate) fn build_hand_event(
    hand: &HandInfo,
    identifiers: &[u32],
    timestamp: u64,
    sender_id: u64,
) -> Result<DigitizerEvent, GestureError> {
    let is_touching = hand.is_touching();
    let mut samples = Vec::with_capacity(hand.fingers.len());
    for (finger, identifier) in hand.fingers.iter().zip(identifiers) {
        ensure_supported_phase(finger.phase)?;
        samples.push(finger_sample(finger, *identifier));
    }

    Ok(DigitizerEvent {
        timestamp,
        sender_id,
        transducer: TransducerType::Hand,
        mask: hand.event_mask(),
        is_touching,
        display_integrated: true,
        samples,
    })
}

fn finger_sample(finger: &FingerInfo, identifier: u32) -> TransducerSample {
    TransducerSample::Finger {
        identifier,
        finger_id: finger.finger_index.raw(),
        mask: finger.event_mask(),
        location: finger.location,
        pressure: finger.pressure,
        twist: finger.twist,
        major_radius: finger.major_radius,
        minor_radius: finger.minor_radius,
        is_touching: finger.is_touching(),
    }
}

/// Builds a composite stylus event with its single sample.
pub(crate) fn build_stylus_event(
    stylus: &StylusInfo,
    identifier: u32,
    timestamp: u64,
    sender_id: u64,
) -> Result<DigitizerEvent, GestureError> {
    ensure_supported_phase(stylus.phase)?;
    let is_touching = stylus.is_touching();

    let sample = TransducerSample::Stylus {
        identifier,
        mask: stylus.event_mask(),
        location: stylus.location,
        pressure: stylus.pressure * STYLUS_PRESSURE_SCALE,
        twist: stylus.twist,
        altitude: PI - stylus.altitude,
        azimuth: 2.0 * PI - stylus.azimuth,
        is_touching,
    };

    Ok(DigitizerEvent {
        timestamp,
        sender_id,
        transducer: TransducerType::Stylus,
        mask: stylus.event_mask(),
        is_touching,
        display_integrated: true,
        samples: vec![sample],
    })
}

pub(crate) fn build_keyboard_event(
    key: KeyboardKey,
    is_down: bool,
    timestamp: u64,
    sender_id: u64,
) -> KeyboardEvent {
    KeyboardEvent { timestamp, sender_id, usage_page: KEYBOARD_USAGE_PAGE, key, is_down }
}

pub(crate) fn build_marker_event(
    correlation_id: u32,
    timestamp: u64,
    sender_id: u64,
) -> MarkerEvent {
    MarkerEvent { timestamp, sender_id, usage_page: MARKER_USAGE_PAGE, correlation_id }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tactile_core::touch::{DigitizerEventMask, FingerIndex};
    use tactile_core::types::Point;

    fn finger(phase: TouchPhase) -> FingerInfo {
        FingerInfo {
            finger_index: FingerIndex::RightThumb,
            location: Point::new(10.0, 20.0),
            phase,
            pressure: 0.0,
            twist: 0.0,
            major_radius: 5.0,
            minor_radius: 5.0,
        }
    }

    #[rstest]
    #[case(TouchPhase::RegionEntered)]
    #[case(TouchPhase::RegionMoved)]
    #[case(TouchPhase::RegionExited)]
    fn region_phases_are_rejected(#[case] phase: TouchPhase) {
        let hand = HandInfo::new(vec![finger(phase)]);
        let error = build_hand_event(&hand, &[1], 0, 1).unwrap_err();
        assert_eq!(error, GestureError::UnsupportedPhase { phase });
    }

    #[rstest]
    fn hand_event_pairs_fingers_with_identifiers() {
        let hand = HandInfo::new(vec![finger(TouchPhase::Began)]);
        let event = build_hand_event(&hand, &[7], 123, 42).unwrap();

        assert_eq!(event.transducer, TransducerType::Hand);
        assert_eq!(event.timestamp, 123);
        assert_eq!(event.sender_id, 42);
        assert!(event.is_touching);
        assert_eq!(event.samples.len(), 1);
        assert_eq!(event.samples[0].identifier(), 7);
        assert!(event.mask.contains(DigitizerEventMask::TOUCH));
        assert!(!event.mask.contains(DigitizerEventMask::RANGE));
    }

    #[rstest]
    fn stylus_sample_uses_wire_space_attributes() {
        let stylus = StylusInfo {
            location: Point::new(1.0, 2.0),
            phase: TouchPhase::Began,
            pressure: 0.5,
            twist: 0.0,
            altitude: 0.25,
            azimuth: 1.0,
        };
        let event = build_stylus_event(&stylus, 3, 0, 1).unwrap();

        match event.samples[0] {
            TransducerSample::Stylus { pressure, altitude, azimuth, .. } => {
                assert_eq!(pressure, 250.0);
                assert_eq!(altitude, PI - 0.25);
                assert_eq!(azimuth, 2.0 * PI - 1.0);
            }
            TransducerSample::Finger { .. } => panic!("expected a stylus sample"),
        }
    }

    #[rstest]
    fn keyboard_and_marker_events_carry_their_pages() {
        let key = build_keyboard_event(KeyboardKey::LetterA, true, 5, 9);
        assert_eq!(key.usage_page, KEYBOARD_USAGE_PAGE);
        assert!(key.is_down);

        let marker = build_marker_event(77, 5, 9);
        assert_eq!(marker.usage_page, MARKER_USAGE_PAGE);
        assert_eq!(marker.correlation_id, 77);
    }
}
