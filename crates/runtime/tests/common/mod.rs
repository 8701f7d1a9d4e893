#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use tactile_core::event::{DigitizerEvent, InputEvent};
use tactile_core::host::{DeviceProfile, HostSurface};
use tactile_host_mock::MockHost;
use tactile_runtime::{EventGenerator, GeneratorSettings};

/// Settings with short delays so suites stay fast.
pub fn fast_settings() -> GeneratorSettings {
    GeneratorSettings::default()
        .with_finger_lift_delay(Duration::from_millis(5))
        .with_check_interval(Duration::from_millis(5))
        .with_ready_timeout(Duration::from_millis(500))
}

pub fn generator_for(profile: DeviceProfile) -> (Arc<MockHost>, EventGenerator) {
    let host = Arc::new(MockHost::new(profile));
    let host_surface: Arc<dyn HostSurface> = host.clone();
    let generator = EventGenerator::with_settings(host_surface, fast_settings())
        .expect("generator should initialize against a ready mock host");
    (host, generator)
}

pub fn phone() -> (Arc<MockHost>, EventGenerator) {
    generator_for(DeviceProfile::phone())
}

pub fn tablet() -> (Arc<MockHost>, EventGenerator) {
    generator_for(DeviceProfile::tablet())
}

/// The digitizer events of a log, in processing order.
pub fn digitizer_events(log: &[InputEvent]) -> Vec<&DigitizerEvent> {
    log.iter().filter_map(InputEvent::as_digitizer).collect()
}
