mod common;

use common::{digitizer_events, fast_settings};
use std::sync::Arc;
use std::time::Duration;
use tactile_core::HostError;
use tactile_core::event::InputEvent;
use tactile_core::host::{DeviceProfile, HostSurface};
use tactile_host_mock::MockHost;
use tactile_runtime::{EventGenerator, GestureError};

#[test]
fn unacknowledged_delivery_times_out() {
    let host = Arc::new(MockHost::new(DeviceProfile::phone()));
    let timeout = Duration::from_millis(30);
    let host_surface: Arc<dyn HostSurface> = host.clone();
    let mut events = EventGenerator::with_settings(
        host_surface,
        fast_settings().with_ack_timeout(timeout),
    )
    .unwrap();

    host.set_echoes_enabled(false);
    let error = events.finger_down(None, None).unwrap_err();
    assert_eq!(error, GestureError::DeliveryTimeout { timeout });
}

#[test]
fn routing_failure_is_reported_before_injection() {
    let host = Arc::new(MockHost::new(DeviceProfile::phone()));
    let host_surface: Arc<dyn HostSurface> = host.clone();
    let mut events =
        EventGenerator::with_settings(host_surface, fast_settings()).unwrap();

    host.set_context_available(false);
    let error = events.finger_down(None, None).unwrap_err();
    assert_eq!(error, GestureError::Host(HostError::ContextUnavailable));
    assert_eq!(host.queued_count(), 0);
    assert_eq!(host.processed_count(), 0);
}

#[test]
fn events_carry_the_configured_sender_id() {
    let host = Arc::new(MockHost::new(DeviceProfile::phone()));
    let host_surface: Arc<dyn HostSurface> = host.clone();
    let mut events = EventGenerator::with_settings(
        host_surface,
        fast_settings().with_sender_id(0xBEEF),
    )
    .unwrap();

    events.finger_tap(None, None).unwrap();

    let log = host.take_event_log();
    assert!(!log.is_empty());
    for event in &log {
        let sender = match event {
            InputEvent::Digitizer(event) => event.sender_id,
            InputEvent::Keyboard(event) => event.sender_id,
            InputEvent::Marker(event) => event.sender_id,
        };
        assert_eq!(sender, 0xBEEF);
    }
}

#[test]
fn digitizer_timestamps_never_decrease() {
    let host = Arc::new(MockHost::new(DeviceProfile::phone()));
    let host_surface: Arc<dyn HostSurface> = host.clone();
    let mut events =
        EventGenerator::with_settings(host_surface, fast_settings()).unwrap();

    events.finger_tap(None, None).unwrap();
    events.finger_tap(None, None).unwrap();

    let log = host.take_event_log();
    let touches = digitizer_events(&log);
    assert!(touches.windows(2).all(|pair| pair[0].timestamp <= pair[1].timestamp));
}

#[test]
fn a_generator_on_an_unready_host_fails_to_initialize() {
    let host = Arc::new(MockHost::new(DeviceProfile::phone()));
    host.set_ready(false);

    let host_surface: Arc<dyn HostSurface> = host.clone();
    let error = EventGenerator::with_settings(
        host_surface,
        fast_settings().with_ready_timeout(Duration::from_millis(30)),
    )
    .unwrap_err();
    assert_eq!(error, GestureError::Host(HostError::NotReady));
}
