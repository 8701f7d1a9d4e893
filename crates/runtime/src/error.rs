use std::time::Duration;
use tactile_core::HostError;
use tactile_core::touch::{FingerIndex, TouchPhase};
use tactile_core::types::Point;
use thiserror::Error;

/// Failures surfaced by gesture, keyboard and wait operations.
///
/// Every failure is terminal: the engine never retries, because replaying a
/// misordered touch sequence would itself corrupt gesture semantics.
/// Composite gestures validate all preconditions before emitting any event,
/// so a failed call leaves no partial contact state behind.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GestureError {
    #[error("host interaction failed: {0}")]
    Host(#[from] HostError),

    #[error("device does not support touches")]
    DeviceDoesNotSupportTouches,

    #[error("device does not support a stylus")]
    DeviceDoesNotSupportStylus,

    #[error("a touch for finger {index} already exists")]
    FingerAlreadyActive { index: FingerIndex },

    #[error("{}", contact_not_found_message(.index))]
    ContactNotFound { index: Option<FingerIndex> },

    #[error("the maximum number of simultaneous fingers has been reached ({limit})")]
    FingerLimitReached { limit: usize },

    #[error("invalid number of fingers, got {count} expected {expected}")]
    InvalidFingerCount { count: usize, expected: usize },

    #[error("a touch for the stylus already exists")]
    StylusAlreadyActive,

    #[error("no active stylus touch exists")]
    StylusNotActive,

    #[error("point is not hittable: {point}")]
    PointNotHittable { point: Point },

    #[error("unknown keyboard mapping for character {character:?}")]
    UnknownKeyForCharacter { character: char },

    #[error("unsupported touch phase {phase}")]
    UnsupportedPhase { phase: TouchPhase },

    #[error("event delivery was not acknowledged within {timeout:?}")]
    DeliveryTimeout { timeout: Duration },

    #[error("timeout while waiting for condition exceeded {timeout:?}")]
    WaitConditionTimeout { timeout: Duration },
}

fn contact_not_found_message(index: &Option<FingerIndex>) -> String {
    match index {
        Some(index) => format!("no active touch for finger {index}"),
        None => String::from("no active touch contacts"),
    }
}
