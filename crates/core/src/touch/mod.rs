mod finger;
mod phase;
mod stylus;

pub use finger::{FingerIndex, FingerInfo, HandInfo};
pub use phase::{DigitizerEventMask, TouchPhase};
pub use stylus::StylusInfo;
