use crate::touch::{DigitizerEventMask, TouchPhase};
use crate::types::Point;
use serde::{Deserialize, Serialize};

/// The stylus state carried by a stylus event.
///
/// `altitude` is in radians where 0 points straight down into the glass;
/// `azimuth` is in radians where 0 is true north, clockwise positive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StylusInfo {
    pub location: Point,
    pub phase: TouchPhase,
    pub pressure: f64,
    pub twist: f64,
    pub altitude: f64,
    pub azimuth: f64,
}

impl StylusInfo {
    /// Stylus events always carry the attribute bit since pressure,
    /// altitude and azimuth accompany every sample.
    pub fn event_mask(&self) -> DigitizerEventMask {
        self.phase.event_mask() | DigitizerEventMask::ATTRIBUTE
    }

    pub fn is_touching(&self) -> bool {
        self.phase.is_touching()
    }
}
