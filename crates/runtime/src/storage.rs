use crate::error::GestureError;
use tactile_core::host::DeviceProfile;
use tactile_core::touch::{FingerIndex, FingerInfo, StylusInfo};
use tactile_core::types::Point;

/// Bookkeeping of the currently active contacts of one generator.
///
/// Fingers are kept in insertion order; updating a finger moves it to the
/// back so "the last fingers that went down" tracks the most recently
/// updated contacts. At most one stylus contact can be active, and only on
/// devices that declare stylus support.
#[derive(Debug)]
pub struct TouchRegistry {
    profile: DeviceProfile,
    fingers: Vec<(FingerInfo, u32)>,
    stylus: Option<(StylusInfo, u32)>,
}

impl TouchRegistry {
    pub fn new(profile: DeviceProfile) -> Self {
        Self { profile, fingers: Vec::new(), stylus: None }
    }

    pub fn profile(&self) -> DeviceProfile {
        self.profile
    }

    /// Active fingers in insertion order.
    pub fn fingers(&self) -> impl Iterator<Item = &FingerInfo> {
        self.fingers.iter().map(|(finger, _)| finger)
    }

    pub fn active_indices(&self) -> Vec<FingerIndex> {
        self.fingers.iter().map(|(finger, _)| finger.finger_index).collect()
    }

    pub fn identifier_for(&self, index: FingerIndex) -> Option<u32> {
        self.fingers
            .iter()
            .find(|(finger, _)| finger.finger_index == index)
            .map(|(_, identifier)| *identifier)
    }

    pub fn location_for(&self, index: FingerIndex) -> Option<Point> {
        self.fingers
            .iter()
            .find(|(finger, _)| finger.finger_index == index)
            .map(|(finger, _)| finger.location)
    }

    pub fn stylus(&self) -> Option<&StylusInfo> {
        self.stylus.as_ref().map(|(stylus, _)| stylus)
    }

    pub fn stylus_identifier(&self) -> Option<u32> {
        self.stylus.as_ref().map(|(_, identifier)| *identifier)
    }

    pub fn len(&self) -> usize {
        self.fingers.len() + usize::from(self.stylus.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.fingers.is_empty() && self.stylus.is_none()
    }

    /// Registers a new finger contact under a freshly allocated identifier.
    pub fn begin_finger(&mut self, finger: FingerInfo, identifier: u32) -> Result<(), GestureError> {
        if self.profile.finger_capacity == 0 {
            return Err(GestureError::DeviceDoesNotSupportTouches);
        }

        if self.identifier_for(finger.finger_index).is_some() {
            return Err(GestureError::FingerAlreadyActive { index: finger.finger_index });
        }

        if self.fingers.len() >= self.profile.finger_capacity {
            return Err(GestureError::FingerLimitReached { limit: self.profile.finger_capacity });
        }

        self.fingers.push((finger, identifier));
        Ok(())
    }

    /// Registers the stylus contact under a freshly allocated identifier.
    pub fn begin_stylus(&mut self, stylus: StylusInfo, identifier: u32) -> Result<(), GestureError> {
        if !self.profile.supports_stylus {
            return Err(GestureError::DeviceDoesNotSupportStylus);
        }

        if self.stylus.is_some() {
            return Err(GestureError::StylusAlreadyActive);
        }

        self.stylus = Some((stylus, identifier));
        Ok(())
    }

    /// Replaces the state of an active finger, moving it to the back of the
    /// insertion order.
    pub fn update_finger(&mut self, finger: FingerInfo, identifier: u32) -> Result<(), GestureError> {
        let position = self
            .fingers
            .iter()
            .position(|(_, existing)| *existing == identifier)
            .ok_or(GestureError::ContactNotFound { index: Some(finger.finger_index) })?;

        self.fingers.remove(position);
        self.fingers.push((finger, identifier));
        Ok(())
    }

    pub fn update_stylus(&mut self, stylus: StylusInfo, identifier: u32) -> Result<(), GestureError> {
        match &mut self.stylus {
            Some((existing, existing_id)) if *existing_id == identifier => {
                *existing = stylus;
                Ok(())
            }
            _ => Err(GestureError::StylusNotActive),
        }
    }

    /// Removes the contact bound to the identifier, finger or stylus.
    pub fn end(&mut self, identifier: u32) -> Result<(), GestureError> {
        if let Some(position) = self.fingers.iter().position(|(_, existing)| *existing == identifier)
        {
            self.fingers.remove(position);
            return Ok(());
        }

        if self.stylus.as_ref().is_some_and(|(_, existing)| *existing == identifier) {
            self.stylus = None;
            return Ok(());
        }

        Err(GestureError::ContactNotFound { index: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tactile_core::touch::TouchPhase;

    fn finger(index: FingerIndex, x: f64) -> FingerInfo {
        FingerInfo {
            finger_index: index,
            location: Point::new(x, 0.0),
            phase: TouchPhase::Began,
            pressure: 0.0,
            twist: 0.0,
            major_radius: 5.0,
            minor_radius: 5.0,
        }
    }

    fn stylus() -> StylusInfo {
        StylusInfo {
            location: Point::new(0.0, 0.0),
            phase: TouchPhase::Began,
            pressure: 0.0,
            twist: 0.0,
            altitude: 0.0,
            azimuth: 0.0,
        }
    }

    #[rstest]
    fn begin_rejects_duplicate_finger_index() {
        let mut registry = TouchRegistry::new(DeviceProfile::phone());
        registry.begin_finger(finger(FingerIndex::RightThumb, 0.0), 1).unwrap();
        let error = registry.begin_finger(finger(FingerIndex::RightThumb, 5.0), 2).unwrap_err();
        assert_eq!(error, GestureError::FingerAlreadyActive { index: FingerIndex::RightThumb });
    }

    #[rstest]
    fn begin_enforces_device_capacity() {
        let mut registry = TouchRegistry::new(DeviceProfile::phone());
        for (slot, index) in FingerIndex::default_order(5).iter().enumerate() {
            registry.begin_finger(finger(*index, 0.0), u32::try_from(slot).unwrap() + 1).unwrap();
        }

        let error = registry.begin_finger(finger(FingerIndex::LeftThumb, 0.0), 99).unwrap_err();
        assert_eq!(error, GestureError::FingerLimitReached { limit: 5 });
        assert_eq!(registry.len(), 5);
    }

    #[rstest]
    fn zero_capacity_devices_reject_touches() {
        let mut registry = TouchRegistry::new(DeviceProfile::unsupported());
        let error = registry.begin_finger(finger(FingerIndex::RightThumb, 0.0), 1).unwrap_err();
        assert_eq!(error, GestureError::DeviceDoesNotSupportTouches);
    }

    #[rstest]
    fn stylus_requires_support_and_uniqueness() {
        let mut registry = TouchRegistry::new(DeviceProfile::phone());
        assert_eq!(registry.begin_stylus(stylus(), 1), Err(GestureError::DeviceDoesNotSupportStylus));

        let mut registry = TouchRegistry::new(DeviceProfile::tablet());
        registry.begin_stylus(stylus(), 1).unwrap();
        assert_eq!(registry.begin_stylus(stylus(), 2), Err(GestureError::StylusAlreadyActive));
    }

    #[rstest]
    fn update_moves_finger_to_back_of_insertion_order() {
        let mut registry = TouchRegistry::new(DeviceProfile::phone());
        registry.begin_finger(finger(FingerIndex::RightThumb, 0.0), 1).unwrap();
        registry.begin_finger(finger(FingerIndex::RightIndex, 0.0), 2).unwrap();

        registry.update_finger(finger(FingerIndex::RightThumb, 50.0), 1).unwrap();
        assert_eq!(
            registry.active_indices(),
            vec![FingerIndex::RightIndex, FingerIndex::RightThumb]
        );
        assert_eq!(registry.location_for(FingerIndex::RightThumb), Some(Point::new(50.0, 0.0)));
    }

    #[rstest]
    fn update_unknown_identifier_fails() {
        let mut registry = TouchRegistry::new(DeviceProfile::phone());
        let error = registry.update_finger(finger(FingerIndex::RightThumb, 0.0), 7).unwrap_err();
        assert_eq!(error, GestureError::ContactNotFound { index: Some(FingerIndex::RightThumb) });
    }

    #[rstest]
    fn end_removes_either_kind_of_contact() {
        let mut registry = TouchRegistry::new(DeviceProfile::tablet());
        registry.begin_finger(finger(FingerIndex::RightThumb, 0.0), 1).unwrap();
        registry.begin_stylus(stylus(), 2).unwrap();

        registry.end(1).unwrap();
        assert!(registry.identifier_for(FingerIndex::RightThumb).is_none());
        registry.end(2).unwrap();
        assert!(registry.is_empty());

        assert_eq!(registry.end(2), Err(GestureError::ContactNotFound { index: None }));
    }
}
