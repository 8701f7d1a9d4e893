use std::sync::{Mutex, MutexGuard, PoisonError};
use tactile_core::host::TouchVisualizer;
use tactile_core::touch::FingerIndex;
use tactile_core::types::Point;

/// One observed contact update. `None` locations mean the contact lifted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VisualizerUpdate {
    Finger(FingerIndex, Option<Point>),
    Stylus(Option<Point>),
}

/// A [`TouchVisualizer`] that records every update it observes, standing in
/// for the debug overlay a real integration would render.
#[derive(Debug, Default)]
pub struct RecordingVisualizer {
    log: Mutex<Vec<VisualizerUpdate>>,
}

impl RecordingVisualizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the updates observed since the last call and clears the log.
    pub fn take_log(&self) -> Vec<VisualizerUpdate> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<VisualizerUpdate>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TouchVisualizer for RecordingVisualizer {
    fn on_finger_update(&self, index: FingerIndex, location: Option<Point>) {
        self.lock().push(VisualizerUpdate::Finger(index, location));
    }

    fn on_stylus_update(&self, location: Option<Point>) {
        self.lock().push(VisualizerUpdate::Stylus(location));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_are_recorded_in_order() {
        let visualizer = RecordingVisualizer::new();
        visualizer.on_finger_update(FingerIndex::RightThumb, Some(Point::new(1.0, 2.0)));
        visualizer.on_finger_update(FingerIndex::RightThumb, None);
        visualizer.on_stylus_update(Some(Point::new(3.0, 4.0)));

        let log = visualizer.take_log();
        assert_eq!(log.len(), 3);
        assert_eq!(log[1], VisualizerUpdate::Finger(FingerIndex::RightThumb, None));
        assert!(visualizer.take_log().is_empty());
    }
}
