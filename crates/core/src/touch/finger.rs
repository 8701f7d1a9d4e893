use crate::touch::{DigitizerEventMask, TouchPhase};
use crate::types::Point;
use serde::{Deserialize, Serialize};

/// Hardware finger labels in canonical priority order.
///
/// Automatic finger assignment hands these out in declaration order,
/// truncated to the device's finger capacity, so single-finger gestures use
/// the right thumb and a full-hand gesture on a tablet uses all ten.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum FingerIndex {
    RightThumb = 1,
    RightIndex = 2,
    RightMiddle = 3,
    RightRing = 4,
    RightLittle = 5,
    LeftThumb = 6,
    LeftIndex = 7,
    LeftMiddle = 8,
    LeftRing = 9,
    LeftLittle = 10,
}

impl FingerIndex {
    pub const ALL: [FingerIndex; 10] = [
        FingerIndex::RightThumb,
        FingerIndex::RightIndex,
        FingerIndex::RightMiddle,
        FingerIndex::RightRing,
        FingerIndex::RightLittle,
        FingerIndex::LeftThumb,
        FingerIndex::LeftIndex,
        FingerIndex::LeftMiddle,
        FingerIndex::LeftRing,
        FingerIndex::LeftLittle,
    ];

    /// The canonical order truncated to a device's finger capacity.
    pub fn default_order(finger_capacity: usize) -> &'static [FingerIndex] {
        static ORDER: [FingerIndex; 10] = FingerIndex::ALL;
        &ORDER[..finger_capacity.min(ORDER.len())]
    }

    /// The raw transducer index reported to the host.
    pub const fn raw(self) -> u32 {
        self as u32
    }
}

impl std::fmt::Display for FingerIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One finger's contribution to a hand event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FingerInfo {
    pub finger_index: FingerIndex,
    pub location: Point,
    pub phase: TouchPhase,
    pub pressure: f64,
    pub twist: f64,
    pub major_radius: f64,
    pub minor_radius: f64,
}

impl FingerInfo {
    pub fn event_mask(&self) -> DigitizerEventMask {
        let mut mask = self.phase.event_mask();
        if self.pressure > 0.0 {
            mask |= DigitizerEventMask::ATTRIBUTE;
        }
        mask
    }

    pub fn is_touching(&self) -> bool {
        self.phase.is_touching()
    }
}

/// A set of simultaneous finger updates delivered as one composite event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandInfo {
    pub fingers: Vec<FingerInfo>,
}

impl HandInfo {
    pub fn new(fingers: Vec<FingerInfo>) -> Self {
        Self { fingers }
    }

    pub fn is_touching(&self) -> bool {
        self.fingers.iter().any(FingerInfo::is_touching)
    }

    /// Union of the finger masks, restricted to the bits that are
    /// meaningful at the composite level.
    pub fn event_mask(&self) -> DigitizerEventMask {
        self.fingers
            .iter()
            .map(FingerInfo::event_mask)
            .fold(DigitizerEventMask::empty(), |acc, mask| acc | mask)
            & (DigitizerEventMask::TOUCH | DigitizerEventMask::ATTRIBUTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn finger(phase: TouchPhase, pressure: f64) -> FingerInfo {
        FingerInfo {
            finger_index: FingerIndex::RightThumb,
            location: Point::new(10.0, 10.0),
            phase,
            pressure,
            twist: 0.0,
            major_radius: 5.0,
            minor_radius: 5.0,
        }
    }

    #[rstest]
    fn default_order_truncates_to_capacity() {
        assert_eq!(FingerIndex::default_order(5).len(), 5);
        assert_eq!(FingerIndex::default_order(5)[0], FingerIndex::RightThumb);
        assert_eq!(FingerIndex::default_order(10).len(), 10);
        assert!(FingerIndex::default_order(0).is_empty());
        assert_eq!(FingerIndex::default_order(32).len(), 10);
    }

    #[rstest]
    fn pressure_adds_attribute_bit() {
        assert!(!finger(TouchPhase::Began, 0.0).event_mask().contains(DigitizerEventMask::ATTRIBUTE));
        assert!(finger(TouchPhase::Began, 0.5).event_mask().contains(DigitizerEventMask::ATTRIBUTE));
    }

    #[rstest]
    fn hand_mask_is_restricted_to_composite_bits() {
        let hand = HandInfo::new(vec![finger(TouchPhase::Began, 0.5), finger(TouchPhase::Moved, 0.0)]);
        assert_eq!(hand.event_mask(), DigitizerEventMask::TOUCH | DigitizerEventMask::ATTRIBUTE);
    }

    #[rstest]
    fn hand_is_touching_if_any_finger_touches() {
        let hand = HandInfo::new(vec![finger(TouchPhase::Ended, 0.0), finger(TouchPhase::Moved, 0.0)]);
        assert!(hand.is_touching());
        let lifted = HandInfo::new(vec![finger(TouchPhase::Ended, 0.0)]);
        assert!(!lifted.is_touching());
    }
}
