use crate::build::{build_hand_event, build_stylus_event, ensure_supported_phase};
use crate::channel::DeliveryChannel;
use crate::clock::MonotonicClock;
use crate::error::GestureError;
use crate::ids::EventIdAllocator;
use crate::settings::GeneratorSettings;
use crate::storage::TouchRegistry;
use std::collections::VecDeque;
use std::sync::Arc;
use tactile_core::HostError;
use tactile_core::event::InputEvent;
use tactile_core::host::{HostSurface, Locator, TouchVisualizer};
use tactile_core::touch::{FingerIndex, FingerInfo, HandInfo, StylusInfo, TouchPhase};
use tactile_core::types::Point;
use tracing::debug;

/// Generates fake user-interaction events against a host surface.
///
/// One generator drives one surface at a time. It owns all contact state:
/// the identifier allocator, the registry of active touches and the
/// acknowledged delivery channel. Gesture methods are synchronous; between
/// event emissions the generator yields to the host's event loop through
/// the channel, never blocking it.
pub struct EventGenerator {
    host: Arc<dyn HostSurface>,
    settings: GeneratorSettings,
    ids: Arc<EventIdAllocator>,
    clock: MonotonicClock,
    channel: DeliveryChannel,
    pub(crate) touches: TouchRegistry,
    visualizer: Option<Arc<dyn TouchVisualizer>>,
}

impl std::fmt::Debug for EventGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventGenerator")
            .field("settings", &self.settings)
            .field("ids", &self.ids)
            .field("touches", &self.touches)
            .field("has_visualizer", &self.visualizer.is_some())
            .finish_non_exhaustive()
    }
}

impl EventGenerator {
    /// Creates a generator for the given host surface, waiting until the
    /// surface is ready for interaction.
    pub fn new(host: Arc<dyn HostSurface>) -> Result<Self, GestureError> {
        Self::with_settings(host, GeneratorSettings::default())
    }

    pub fn with_settings(
        host: Arc<dyn HostSurface>,
        settings: GeneratorSettings,
    ) -> Result<Self, GestureError> {
        let ids = Arc::new(EventIdAllocator::new());
        let clock = MonotonicClock::start();
        let channel = DeliveryChannel::new(
            Arc::clone(&host),
            Arc::clone(&ids),
            clock,
            settings.sender_id,
            settings.ack_timeout,
        );
        let touches = TouchRegistry::new(host.device_profile());

        let generator =
            Self { host, settings, ids, clock, channel, touches, visualizer: None };
        generator.wait_until_ready()?;
        Ok(generator)
    }

    /// Waits until the host surface is ready to receive interaction events.
    pub fn wait_until_ready(&self) -> Result<(), GestureError> {
        let host = Arc::clone(&self.host);
        self.wait_until(move || host.is_ready_for_interaction(), self.settings.ready_timeout)
            .map_err(|_| GestureError::Host(HostError::NotReady))
    }

    /// Registers a pure observer for active contact locations, e.g. a
    /// debug overlay rendering touch points.
    pub fn set_visualizer(&mut self, visualizer: Arc<dyn TouchVisualizer>) {
        self.visualizer = Some(visualizer);
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Number of currently active contacts, stylus included.
    pub fn active_touch_count(&self) -> usize {
        self.touches.len()
    }

    pub fn has_active_stylus(&self) -> bool {
        self.touches.stylus().is_some()
    }

    /// The most recently issued event identifier, for diagnostics.
    pub fn latest_event_id(&self) -> u32 {
        self.ids.latest()
    }

    pub(crate) fn host(&self) -> &Arc<dyn HostSurface> {
        &self.host
    }

    pub(crate) fn clock_ns(&self) -> u64 {
        self.clock.now_ns()
    }

    pub(crate) fn inject_acknowledged(&self, event: InputEvent) -> Result<(), GestureError> {
        self.channel.inject(event, true)
    }

    /// Resolves a locator to a concrete surface point via the host.
    pub(crate) fn resolve_location(&self, locator: &Locator) -> Result<Point, GestureError> {
        Ok(self.host.resolve_point(locator)?)
    }

    pub(crate) fn resolve_location_or_surface(
        &self,
        locator: Option<&Locator>,
    ) -> Result<Point, GestureError> {
        self.resolve_location(locator.unwrap_or(&Locator::Surface))
    }

    pub(crate) fn check_points_are_hittable(&self, points: &[Point]) -> Result<(), GestureError> {
        for point in points {
            if !self.host.is_point_hittable(*point) {
                return Err(GestureError::PointNotHittable { point: *point });
            }
        }
        Ok(())
    }

    // MARK: - Hand events

    /// Validates, builds and delivers one composite hand event.
    ///
    /// Every precondition is checked before any identifier is allocated or
    /// any registry entry touched, so a failed call emits nothing and
    /// consumes nothing.
    pub(crate) fn send_hand_event(&mut self, hand: HandInfo) -> Result<(), GestureError> {
        let locations: Vec<Point> = hand.fingers.iter().map(|finger| finger.location).collect();
        self.check_points_are_hittable(&locations)?;
        self.validate_hand(&hand)?;

        let timestamp = self.clock.now_ns();
        let mut identifiers = Vec::with_capacity(hand.fingers.len());
        for finger in &hand.fingers {
            identifiers.push(self.resolve_finger_identifier(finger)?);
        }

        let event = build_hand_event(&hand, &identifiers, timestamp, self.settings.sender_id)?;
        debug!(fingers = hand.fingers.len(), touching = hand.is_touching(), "hand event");

        if let Some(visualizer) = &self.visualizer {
            for finger in &hand.fingers {
                let location = finger.is_touching().then_some(finger.location);
                visualizer.on_finger_update(finger.finger_index, location);
            }
        }

        self.channel.inject(InputEvent::Digitizer(event), true)
    }

    /// All-or-nothing precondition checks for a hand event: supported
    /// phases, no duplicate or already-active finger on Began, active
    /// contact on Moved/Ended, and device capacity for the whole batch.
    fn validate_hand(&self, hand: &HandInfo) -> Result<(), GestureError> {
        let capacity = self.touches.profile().finger_capacity;
        let mut beginning: Vec<FingerIndex> = Vec::new();

        for finger in &hand.fingers {
            ensure_supported_phase(finger.phase)?;
            let index = finger.finger_index;
            let active = self.touches.identifier_for(index).is_some();

            match finger.phase {
                TouchPhase::Began => {
                    if capacity == 0 {
                        return Err(GestureError::DeviceDoesNotSupportTouches);
                    }
                    if active || beginning.contains(&index) {
                        return Err(GestureError::FingerAlreadyActive { index });
                    }
                    beginning.push(index);
                }
                TouchPhase::Moved
                | TouchPhase::Stationary
                | TouchPhase::Ended
                | TouchPhase::Cancelled => {
                    if !active {
                        return Err(GestureError::ContactNotFound { index: Some(index) });
                    }
                }
                TouchPhase::RegionEntered
                | TouchPhase::RegionMoved
                | TouchPhase::RegionExited => {
                    return Err(GestureError::UnsupportedPhase { phase: finger.phase });
                }
            }
        }

        let active_fingers = self.touches.active_indices().len();
        if !beginning.is_empty() && active_fingers + beginning.len() > capacity {
            return Err(GestureError::FingerLimitReached { limit: capacity });
        }

        Ok(())
    }

    /// Resolves the contact identifier for one finger update, applying the
    /// lifecycle transition to the registry.
    fn resolve_finger_identifier(&mut self, finger: &FingerInfo) -> Result<u32, GestureError> {
        let existing = self.touches.identifier_for(finger.finger_index);
        match finger.phase {
            TouchPhase::Began => {
                if existing.is_some() {
                    return Err(GestureError::FingerAlreadyActive { index: finger.finger_index });
                }
                let identifier = self.ids.next();
                self.touches.begin_finger(*finger, identifier)?;
                Ok(identifier)
            }
            TouchPhase::Moved | TouchPhase::Stationary => {
                let identifier = existing.ok_or(GestureError::ContactNotFound {
                    index: Some(finger.finger_index),
                })?;
                self.touches.update_finger(*finger, identifier)?;
                Ok(identifier)
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                let identifier = existing.ok_or(GestureError::ContactNotFound {
                    index: Some(finger.finger_index),
                })?;
                self.touches.end(identifier)?;
                Ok(identifier)
            }
            phase => Err(GestureError::UnsupportedPhase { phase }),
        }
    }

    // MARK: - Stylus events

    pub(crate) fn send_stylus_event(&mut self, stylus: StylusInfo) -> Result<(), GestureError> {
        self.check_points_are_hittable(&[stylus.location])?;
        ensure_supported_phase(stylus.phase)?;
        self.validate_stylus(&stylus)?;

        let timestamp = self.clock.now_ns();
        let identifier = self.resolve_stylus_identifier(&stylus)?;
        let event = build_stylus_event(&stylus, identifier, timestamp, self.settings.sender_id)?;
        debug!(touching = stylus.is_touching(), "stylus event");

        if let Some(visualizer) = &self.visualizer {
            visualizer.on_stylus_update(stylus.is_touching().then_some(stylus.location));
        }

        self.channel.inject(InputEvent::Digitizer(event), true)
    }

    fn validate_stylus(&self, stylus: &StylusInfo) -> Result<(), GestureError> {
        let active = self.touches.stylus_identifier().is_some();
        match stylus.phase {
            TouchPhase::Began => {
                if !self.touches.profile().supports_stylus {
                    return Err(GestureError::DeviceDoesNotSupportStylus);
                }
                if active {
                    return Err(GestureError::StylusAlreadyActive);
                }
                Ok(())
            }
            _ => {
                if active {
                    Ok(())
                } else {
                    Err(GestureError::StylusNotActive)
                }
            }
        }
    }

    fn resolve_stylus_identifier(&mut self, stylus: &StylusInfo) -> Result<u32, GestureError> {
        let existing = self.touches.stylus_identifier();
        match stylus.phase {
            TouchPhase::Began => {
                let identifier = self.ids.next();
                self.touches.begin_stylus(*stylus, identifier)?;
                Ok(identifier)
            }
            TouchPhase::Moved | TouchPhase::Stationary => {
                let identifier = existing.ok_or(GestureError::StylusNotActive)?;
                self.touches.update_stylus(*stylus, identifier)?;
                Ok(identifier)
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                let identifier = existing.ok_or(GestureError::StylusNotActive)?;
                self.touches.end(identifier)?;
                Ok(identifier)
            }
            phase => Err(GestureError::UnsupportedPhase { phase }),
        }
    }

    // MARK: - Finger index assignment

    /// Fills automatic slots with currently unused finger indices in
    /// canonical priority order. An explicit list must match the expected
    /// count exactly.
    pub(crate) fn fill_next_finger_indices(
        &self,
        requested: &[Option<FingerIndex>],
        expected: usize,
    ) -> Result<Vec<FingerIndex>, GestureError> {
        if !requested.is_empty() && requested.len() != expected {
            return Err(GestureError::InvalidFingerCount {
                count: requested.len(),
                expected,
            });
        }

        let capacity = self.touches.profile().finger_capacity;
        if capacity == 0 {
            return Err(GestureError::DeviceDoesNotSupportTouches);
        }

        let mut requested = requested.to_vec();
        requested.resize(expected, None);

        let active = self.touches.active_indices();
        let explicit: Vec<FingerIndex> = requested.iter().flatten().copied().collect();
        let mut unused: VecDeque<FingerIndex> = FingerIndex::default_order(capacity)
            .iter()
            .copied()
            .filter(|index| !active.contains(index) && !explicit.contains(index))
            .collect();

        let mut filled = Vec::with_capacity(expected);
        for slot in requested {
            match slot {
                Some(index) => filled.push(index),
                None => match unused.pop_front() {
                    Some(index) => filled.push(index),
                    None => {
                        return Err(GestureError::FingerLimitReached { limit: capacity });
                    }
                },
            }
        }
        Ok(filled)
    }

    /// Fills automatic slots with active finger indices, preferring the
    /// most recently added so an unqualified up/move targets the last
    /// fingers that went down. An explicit list must reach the minimum.
    pub(crate) fn fill_existing_finger_indices(
        &self,
        requested: &[Option<FingerIndex>],
        minimum: usize,
    ) -> Result<Vec<FingerIndex>, GestureError> {
        if !requested.is_empty() && requested.len() < minimum {
            return Err(GestureError::InvalidFingerCount {
                count: requested.len(),
                expected: minimum,
            });
        }

        let mut requested = requested.to_vec();
        if requested.len() < minimum {
            requested.resize(minimum, None);
        }

        let active = self.touches.active_indices();
        if requested.len() > active.len() {
            return Err(GestureError::ContactNotFound { index: None });
        }

        let explicit: Vec<FingerIndex> = requested.iter().flatten().copied().collect();
        let available: Vec<FingerIndex> =
            active.iter().copied().filter(|index| !explicit.contains(index)).collect();
        let auto_count = requested.iter().filter(|slot| slot.is_none()).count();
        if auto_count > available.len() {
            return Err(GestureError::ContactNotFound { index: None });
        }

        let mut next: VecDeque<FingerIndex> =
            available[available.len() - auto_count..].iter().copied().collect();

        let mut filled = Vec::with_capacity(requested.len());
        for slot in requested {
            match slot {
                Some(index) => filled.push(index),
                None => match next.pop_front() {
                    Some(index) => filled.push(index),
                    None => return Err(GestureError::ContactNotFound { index: None }),
                },
            }
        }
        Ok(filled)
    }

    /// Current location of an active finger.
    pub(crate) fn active_location(&self, index: FingerIndex) -> Result<Point, GestureError> {
        self.touches
            .location_for(index)
            .ok_or(GestureError::ContactNotFound { index: Some(index) })
    }

    pub(crate) fn finger_info(&self, index: FingerIndex, location: Point, phase: TouchPhase) -> FingerInfo {
        FingerInfo {
            finger_index: index,
            location,
            phase,
            pressure: 0.0,
            twist: 0.0,
            major_radius: self.settings.default_finger_radius,
            minor_radius: self.settings.default_finger_radius,
        }
    }
}
