use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a contact at a given event.
///
/// The three region phases describe hover-style proximity events. Real
/// digitizer hardware reports them for styluses near the glass, but the
/// engine rejects them when building events; see
/// `tactile_runtime`'s `UnsupportedPhase` error.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Ended,
    Cancelled,
    RegionEntered,
    RegionMoved,
    RegionExited,
}

impl TouchPhase {
    /// True for every phase where the contact is physically on the glass.
    pub fn is_touching(self) -> bool {
        matches!(self, TouchPhase::Began | TouchPhase::Moved | TouchPhase::Stationary)
    }

    /// The digitizer mask bits implied by this phase alone.
    pub fn event_mask(self) -> DigitizerEventMask {
        let mut mask = DigitizerEventMask::empty();

        if matches!(self, TouchPhase::Began | TouchPhase::Ended | TouchPhase::Cancelled) {
            mask |= DigitizerEventMask::TOUCH | DigitizerEventMask::RANGE;
        }

        if self == TouchPhase::Moved {
            mask |= DigitizerEventMask::POSITION;
        }

        if self == TouchPhase::Cancelled {
            mask |= DigitizerEventMask::CANCEL;
        }

        mask
    }
}

impl std::fmt::Display for TouchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

bitflags! {
    /// Digitizer event mask bits, at the bit positions the HID event system
    /// uses for them.
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct DigitizerEventMask: u32 {
        const RANGE = 1 << 0;
        const TOUCH = 1 << 1;
        const POSITION = 1 << 2;
        const IDENTITY = 1 << 5;
        const ATTRIBUTE = 1 << 6;
        const CANCEL = 1 << 7;
    }
}
