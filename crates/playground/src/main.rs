use std::sync::Arc;
use std::time::Duration;

use tactile_core::host::{DeviceProfile, HostSurface, Locator, TouchVisualizer};
use tactile_core::types::Rect;
use tactile_host_mock::{MockHost, MockView, RecordingVisualizer};
use tactile_runtime::{EventGenerator, GeneratorSettings};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let host = Arc::new(MockHost::new(DeviceProfile::tablet()));
    host.add_view(MockView::new("send-button", Rect::new(360.0, 1050.0, 100.0, 44.0)));

    let visualizer = Arc::new(RecordingVisualizer::new());
    let host_surface: Arc<dyn HostSurface> = host.clone();
    let mut events =
        EventGenerator::with_settings(host_surface, GeneratorSettings::default())?;
    let visualizer_dyn: Arc<dyn TouchVisualizer> = visualizer.clone();
    events.set_visualizer(visualizer_dyn);

    println!("== tap the send button ==");
    events.finger_tap(None, Some(&Locator::view("send-button")))?;
    println!("send-button taps: {}", host.tap_count("send-button"));

    println!("== pinch open at the surface center ==");
    events.finger_pinch_open(&[], None, Some(Duration::from_millis(150)))?;

    println!("== type a message ==");
    events.key_type("Hello, world!")?;

    let log = host.take_event_log();
    println!("processed {} events", log.len());
    println!("{}", serde_json::to_string_pretty(&log)?);
    println!("visualizer updates: {}", visualizer.take_log().len());

    anyhow::ensure!(host.tap_count("send-button") == 1, "expected exactly one tap");
    Ok(())
}
