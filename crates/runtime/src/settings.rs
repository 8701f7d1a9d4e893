use std::time::Duration;

/// Tunable timings, distances and identifiers for one generator.
///
/// The defaults were tuned against real gesture recognizers; treat them as
/// starting points rather than physical constants when targeting a
/// different UI runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorSettings {
    /// Delay between touch down and touch up in a tap, modeling the
    /// latency of a human finger lift.
    pub finger_lift_delay: Duration,
    /// Default hold duration for long presses.
    pub long_press_hold_delay: Duration,
    /// Default interval between the taps of a multi-tap.
    pub multi_tap_interval: Duration,
    /// Sampling interval of interpolated moves, one display frame.
    pub finger_move_interval: Duration,
    /// Default duration of pinch gestures.
    pub pinch_duration: Duration,
    /// Default interval between typed characters.
    pub key_type_interval: Duration,
    /// Extra settle time after each key event; key events are processed a
    /// frame later than touch events.
    pub key_settle_delay: Duration,
    /// Default distance between the two fingers of two-finger gestures.
    pub two_finger_distance: f64,
    /// Default finger distance for rotation gestures.
    pub rotation_distance: f64,
    /// Default expanded pinch distance.
    pub pinch_large_distance: f64,
    /// Default contracted pinch distance.
    pub pinch_small_distance: f64,
    /// Contact ellipse radius reported for fingers.
    pub default_finger_radius: f64,
    /// How long to wait for the host to acknowledge a delivered event.
    pub ack_timeout: Duration,
    /// How long to wait for the host to become ready at construction.
    pub ready_timeout: Duration,
    /// Polling interval of the wait-for-condition helpers.
    pub check_interval: Duration,
    /// Sender identifier stamped on every event. Any nonzero value.
    pub sender_id: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            finger_lift_delay: Duration::from_millis(50),
            long_press_hold_delay: Duration::from_secs(2),
            multi_tap_interval: Duration::from_millis(150),
            finger_move_interval: Duration::from_secs(1) / 60,
            pinch_duration: Duration::from_millis(150),
            key_type_interval: Duration::from_millis(20),
            key_settle_delay: Duration::from_millis(20),
            two_finger_distance: 20.0,
            rotation_distance: 100.0,
            pinch_large_distance: 200.0,
            pinch_small_distance: 20.0,
            default_finger_radius: 5.0,
            ack_timeout: Duration::from_secs(1),
            ready_timeout: Duration::from_secs(3),
            check_interval: Duration::from_millis(100),
            sender_id: 0x0000_0001_2345_6789,
        }
    }
}

impl GeneratorSettings {
    pub fn with_sender_id(mut self, sender_id: u64) -> Self {
        self.sender_id = sender_id;
        self
    }

    pub fn with_ack_timeout(mut self, timeout: Duration) -> Self {
        self.ack_timeout = timeout;
        self
    }

    pub fn with_ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = timeout;
        self
    }

    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    pub fn with_finger_lift_delay(mut self, delay: Duration) -> Self {
        self.finger_lift_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_values() {
        let settings = GeneratorSettings::default();
        assert_eq!(settings.finger_lift_delay, Duration::from_millis(50));
        assert_eq!(settings.pinch_large_distance, 200.0);
        assert_ne!(settings.sender_id, 0);
    }

    #[test]
    fn builders_override_single_fields() {
        let settings = GeneratorSettings::default()
            .with_sender_id(0xBEEF)
            .with_ack_timeout(Duration::from_millis(10));
        assert_eq!(settings.sender_id, 0xBEEF);
        assert_eq!(settings.ack_timeout, Duration::from_millis(10));
        assert_eq!(settings.ready_timeout, Duration::from_secs(3));
    }
}
