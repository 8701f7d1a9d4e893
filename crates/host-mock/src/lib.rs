//! In-memory mock host surface for Tactile tests.
//!
//! The mock models the parts of a UI runtime the engine depends on: a
//! surface frame, a registered view tree with hittability flags, a
//! single-threaded FIFO event queue drained by `pump`, and a processed-event
//! feed that echoes every drained event to its subscribers. A naive tap
//! recognizer counts down/up pairs landing inside a view so integration
//! tests can observe "triggered" effects.

mod visualizer;

pub use visualizer::{RecordingVisualizer, VisualizerUpdate};

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tactile_core::HostError;
use tactile_core::event::{InputEvent, TransducerSample};
use tactile_core::host::{ContextId, DeviceProfile, EchoHandler, HostSurface, Locator};
use tactile_core::touch::DigitizerEventMask;
use tactile_core::types::{Point, Rect};
use tracing::debug;

/// A view registered on the mock surface.
#[derive(Clone, Debug)]
pub struct MockView {
    pub identifier: String,
    pub kind: String,
    pub frame: Rect,
    pub visible: bool,
    pub hittable: bool,
    pub in_hierarchy: bool,
}

impl MockView {
    pub fn new(identifier: impl Into<String>, frame: Rect) -> Self {
        Self {
            identifier: identifier.into(),
            kind: String::from("View"),
            frame,
            visible: true,
            hittable: true,
            in_hierarchy: true,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_hittable(mut self, hittable: bool) -> Self {
        self.hittable = hittable;
        self
    }

    pub fn with_in_hierarchy(mut self, in_hierarchy: bool) -> Self {
        self.in_hierarchy = in_hierarchy;
        self
    }
}

#[derive(Default)]
struct HostState {
    ready: bool,
    key_surface: bool,
    context_available: bool,
    echoes_enabled: bool,
    views: Vec<MockView>,
    queue: VecDeque<InputEvent>,
    processed: Vec<InputEvent>,
    handlers: Vec<EchoHandler>,
    touch_views: HashMap<u32, String>,
    tap_counts: HashMap<String, usize>,
}

impl HostState {
    /// Topmost registered view whose frame contains the point; views added
    /// later sit above earlier ones.
    fn view_at(&self, point: Point) -> Option<&MockView> {
        self.views.iter().rev().find(|view| view.in_hierarchy && view.frame.contains(point))
    }

    fn view_named(&self, identifier: &str) -> Option<&MockView> {
        self.views.iter().find(|view| view.identifier == identifier)
    }

    /// Tracks finger samples through their lifecycle and counts a tap when
    /// a contact begins and ends inside the same view without leaving it.
    fn track(&mut self, event: &InputEvent) {
        let Some(digitizer) = event.as_digitizer() else {
            return;
        };

        for sample in digitizer.samples.clone() {
            let TransducerSample::Finger { identifier, mask, location, is_touching, .. } = sample
            else {
                continue;
            };

            if mask.contains(DigitizerEventMask::CANCEL) {
                self.touch_views.remove(&identifier);
            } else if mask.contains(DigitizerEventMask::TOUCH) && is_touching {
                let target = self
                    .view_at(location)
                    .filter(|view| view.hittable && view.visible)
                    .map(|view| view.identifier.clone());
                if let Some(target) = target {
                    self.touch_views.insert(identifier, target);
                }
            } else if mask.contains(DigitizerEventMask::TOUCH) && !is_touching {
                if let Some(target) = self.touch_views.remove(&identifier) {
                    let still_inside = self
                        .view_named(&target)
                        .is_some_and(|view| view.frame.contains(location));
                    if still_inside {
                        *self.tap_counts.entry(target).or_insert(0) += 1;
                    }
                }
            } else if mask.contains(DigitizerEventMask::POSITION) {
                let left_view = self
                    .touch_views
                    .get(&identifier)
                    .and_then(|target| self.view_named(target))
                    .is_some_and(|view| !view.frame.contains(location));
                if left_view {
                    self.touch_views.remove(&identifier);
                }
            }
        }
    }
}

/// A deterministic, single-threaded [`HostSurface`] implementation.
pub struct MockHost {
    frame: Rect,
    profile: DeviceProfile,
    context: ContextId,
    state: Mutex<HostState>,
}

impl MockHost {
    /// Creates a mock with the default frame for the device class.
    pub fn new(profile: DeviceProfile) -> Self {
        let frame = if profile.finger_capacity > 5 {
            Rect::new(0.0, 0.0, 820.0, 1180.0)
        } else {
            Rect::new(0.0, 0.0, 390.0, 844.0)
        };
        Self::with_frame(profile, frame)
    }

    pub fn with_frame(profile: DeviceProfile, frame: Rect) -> Self {
        Self {
            frame,
            profile,
            context: ContextId::new(0xC0DE),
            state: Mutex::new(HostState {
                ready: true,
                key_surface: true,
                context_available: true,
                echoes_enabled: true,
                ..HostState::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // MARK: - Configuration

    pub fn set_ready(&self, ready: bool) {
        self.lock().ready = ready;
    }

    pub fn set_key_surface(&self, key_surface: bool) {
        self.lock().key_surface = key_surface;
    }

    pub fn set_context_available(&self, available: bool) {
        self.lock().context_available = available;
    }

    /// Suppresses the processed-event feed, simulating a host that never
    /// acknowledges deliveries.
    pub fn set_echoes_enabled(&self, enabled: bool) {
        self.lock().echoes_enabled = enabled;
    }

    pub fn add_view(&self, view: MockView) {
        self.lock().views.push(view);
    }

    /// Flips the hittable flag of a registered view. Returns false if no
    /// view has the identifier.
    pub fn set_view_hittable(&self, identifier: &str, hittable: bool) -> bool {
        let mut state = self.lock();
        match state.views.iter_mut().find(|view| view.identifier == identifier) {
            Some(view) => {
                view.hittable = hittable;
                true
            }
            None => false,
        }
    }

    pub fn set_view_visible(&self, identifier: &str, visible: bool) -> bool {
        let mut state = self.lock();
        match state.views.iter_mut().find(|view| view.identifier == identifier) {
            Some(view) => {
                view.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn remove_view(&self, identifier: &str) {
        self.lock().views.retain(|view| view.identifier != identifier);
    }

    // MARK: - Observation

    /// Returns the processed events since the last call and clears the log.
    pub fn take_event_log(&self) -> Vec<InputEvent> {
        std::mem::take(&mut self.lock().processed)
    }

    pub fn processed_count(&self) -> usize {
        self.lock().processed.len()
    }

    pub fn queued_count(&self) -> usize {
        self.lock().queue.len()
    }

    /// Completed taps recognized inside the view so far.
    pub fn tap_count(&self, identifier: &str) -> usize {
        self.lock().tap_counts.get(identifier).copied().unwrap_or(0)
    }
}

impl HostSurface for MockHost {
    fn surface_frame(&self) -> Rect {
        self.frame
    }

    fn device_profile(&self) -> DeviceProfile {
        self.profile
    }

    fn current_context(&self) -> Result<ContextId, HostError> {
        if self.lock().context_available {
            Ok(self.context)
        } else {
            Err(HostError::ContextUnavailable)
        }
    }

    fn is_ready_for_interaction(&self) -> bool {
        self.lock().ready
    }

    fn is_key_surface(&self) -> bool {
        let state = self.lock();
        state.ready && state.key_surface
    }

    fn resolve_point(&self, locator: &Locator) -> Result<Point, HostError> {
        match locator {
            Locator::Point(point) => Ok(*point),
            Locator::Rect(rect) => Ok(rect.center()),
            Locator::Surface => Ok(self.frame.center()),
            Locator::View(identifier) => self.resolve_view(identifier, None),
            Locator::TypedView { identifier, kind } => self.resolve_view(identifier, Some(kind)),
        }
    }

    fn is_point_hittable(&self, point: Point) -> bool {
        if !self.frame.contains(point) {
            return false;
        }
        self.lock().view_at(point).is_none_or(|view| view.hittable && view.visible)
    }

    fn is_point_visible(&self, point: Point) -> bool {
        if !self.frame.contains(point) {
            return false;
        }
        self.lock().view_at(point).is_none_or(|view| view.visible)
    }

    fn inject(&self, event: InputEvent, context: ContextId) -> Result<(), HostError> {
        if context != self.context {
            return Err(HostError::Injection {
                message: format!("unknown target context {context}"),
            });
        }

        let mut state = self.lock();
        debug!(queued = state.queue.len(), "event injected");
        state.queue.push_back(event);
        Ok(())
    }

    fn subscribe_echoes(&self, handler: EchoHandler) {
        self.lock().handlers.push(handler);
    }

    fn pump(&self, budget: Duration) {
        let (drained, handlers) = {
            let mut state = self.lock();
            if state.queue.is_empty() {
                drop(state);
                if !budget.is_zero() {
                    std::thread::sleep(budget);
                }
                return;
            }

            let drained: Vec<InputEvent> = state.queue.drain(..).collect();
            for event in &drained {
                state.track(event);
                state.processed.push(event.clone());
            }
            let handlers =
                if state.echoes_enabled { state.handlers.clone() } else { Vec::new() };
            (drained, handlers)
        };

        debug!(count = drained.len(), "events processed");
        for event in &drained {
            for handler in &handlers {
                handler(event);
            }
        }
    }
}

impl MockHost {
    fn resolve_view(&self, identifier: &str, kind: Option<&str>) -> Result<Point, HostError> {
        let state = self.lock();
        let view = state.view_named(identifier).ok_or_else(|| HostError::ViewNotFound {
            identifier: identifier.to_string(),
        })?;

        if let Some(expected) = kind {
            if view.kind != expected {
                return Err(HostError::InvalidViewType {
                    identifier: identifier.to_string(),
                    expected: expected.to_string(),
                });
            }
        }

        if !view.in_hierarchy {
            return Err(HostError::NotInHierarchy { identifier: identifier.to_string() });
        }

        if !view.visible {
            return Err(HostError::NotVisible { identifier: identifier.to_string() });
        }

        if !view.hittable {
            return Err(HostError::NotHittable { identifier: identifier.to_string() });
        }

        Ok(view.frame.center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tactile_core::event::{MARKER_USAGE_PAGE, MarkerEvent};

    fn marker(correlation_id: u32) -> InputEvent {
        InputEvent::Marker(MarkerEvent {
            timestamp: 0,
            sender_id: 1,
            usage_page: MARKER_USAGE_PAGE,
            correlation_id,
        })
    }

    #[rstest]
    fn pump_processes_events_in_injection_order() {
        let host = MockHost::new(DeviceProfile::phone());
        let context = host.current_context().unwrap();
        host.inject(marker(1), context).unwrap();
        host.inject(marker(2), context).unwrap();

        host.pump(Duration::ZERO);
        let log = host.take_event_log();
        let ids: Vec<u32> =
            log.iter().filter_map(|event| event.as_marker()).map(|m| m.correlation_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(host.queued_count(), 0);
    }

    #[rstest]
    fn echoes_reach_every_subscriber_unless_disabled() {
        let host = MockHost::new(DeviceProfile::phone());
        let seen = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&seen);
        host.subscribe_echoes(Arc::new(move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
        }));

        let context = host.current_context().unwrap();
        host.inject(marker(1), context).unwrap();
        host.pump(Duration::ZERO);
        assert_eq!(seen.load(Ordering::SeqCst), 1);

        host.set_echoes_enabled(false);
        host.inject(marker(2), context).unwrap();
        host.pump(Duration::ZERO);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn inject_rejects_foreign_contexts() {
        let host = MockHost::new(DeviceProfile::phone());
        let error = host.inject(marker(1), ContextId::new(0xDEAD)).unwrap_err();
        assert!(matches!(error, HostError::Injection { .. }));
    }

    #[rstest]
    fn unavailable_context_is_reported() {
        let host = MockHost::new(DeviceProfile::phone());
        host.set_context_available(false);
        assert_eq!(host.current_context(), Err(HostError::ContextUnavailable));
    }

    #[rstest]
    fn view_resolution_reports_each_failure_kind() {
        let host = MockHost::new(DeviceProfile::phone());
        host.add_view(MockView::new("button", Rect::new(10.0, 10.0, 100.0, 40.0)).with_kind("Button"));
        host.add_view(MockView::new("ghost", Rect::new(10.0, 60.0, 100.0, 40.0)).with_visible(false));
        host.add_view(
            MockView::new("detached", Rect::new(10.0, 110.0, 100.0, 40.0)).with_in_hierarchy(false),
        );
        host.add_view(
            MockView::new("shielded", Rect::new(10.0, 160.0, 100.0, 40.0)).with_hittable(false),
        );

        assert_eq!(
            host.resolve_point(&Locator::view("button")).unwrap(),
            Point::new(60.0, 30.0)
        );
        assert!(matches!(
            host.resolve_point(&Locator::view("missing")),
            Err(HostError::ViewNotFound { .. })
        ));
        assert!(matches!(
            host.resolve_point(&Locator::TypedView {
                identifier: String::from("button"),
                kind: String::from("Slider"),
            }),
            Err(HostError::InvalidViewType { .. })
        ));
        assert!(matches!(
            host.resolve_point(&Locator::view("detached")),
            Err(HostError::NotInHierarchy { .. })
        ));
        assert!(matches!(
            host.resolve_point(&Locator::view("ghost")),
            Err(HostError::NotVisible { .. })
        ));
        assert!(matches!(
            host.resolve_point(&Locator::view("shielded")),
            Err(HostError::NotHittable { .. })
        ));
    }

    #[rstest]
    fn hittability_respects_topmost_view() {
        let host = MockHost::new(DeviceProfile::phone());
        host.add_view(MockView::new("button", Rect::new(10.0, 10.0, 100.0, 40.0)));
        host.add_view(
            MockView::new("overlay", Rect::new(0.0, 0.0, 200.0, 200.0)).with_hittable(false),
        );

        // The overlay sits above the button and swallows hits.
        assert!(!host.is_point_hittable(Point::new(60.0, 30.0)));
        assert!(host.is_point_hittable(Point::new(300.0, 300.0)));
        assert!(!host.is_point_hittable(Point::new(-5.0, 10.0)));
    }
}
