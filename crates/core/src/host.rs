//! The capability contract a host UI runtime supplies to the engine.
//!
//! The generator never reaches into host internals: everything it needs —
//! hit testing, event injection, the echo feed, and the event-loop tick —
//! is expressed on [`HostSurface`] and implemented by an integration crate
//! (or by `tactile-host-mock` in tests).

use crate::error::HostError;
use crate::event::InputEvent;
use crate::touch::FingerIndex;
use crate::types::{Point, Rect};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Opaque host-side routing token identifying which window or surface
/// should receive an injected event.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ContextId(u64);

impl ContextId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextId(0x{:x})", self.0)
    }
}

/// Touch capabilities of the simulated device class.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DeviceProfile {
    pub finger_capacity: usize,
    pub supports_stylus: bool,
}

impl DeviceProfile {
    /// A phone: five fingers, no stylus.
    pub const fn phone() -> Self {
        Self { finger_capacity: 5, supports_stylus: false }
    }

    /// A tablet: ten fingers and a stylus.
    pub const fn tablet() -> Self {
        Self { finger_capacity: 10, supports_stylus: true }
    }

    /// A device class without touch hardware.
    pub const fn unsupported() -> Self {
        Self { finger_capacity: 0, supports_stylus: false }
    }
}

/// How a caller names a target location on the surface.
#[derive(Clone, Debug, PartialEq)]
pub enum Locator {
    /// An exact point in surface coordinates.
    Point(Point),
    /// The center of a rect in surface coordinates.
    Rect(Rect),
    /// The center of the view with the given identifier.
    View(String),
    /// Like [`Locator::View`], but the host must also verify the view kind
    /// and fail with [`HostError::InvalidViewType`] on mismatch.
    TypedView { identifier: String, kind: String },
    /// The center of the main surface.
    Surface,
}

impl Locator {
    pub fn view(identifier: impl Into<String>) -> Self {
        Locator::View(identifier.into())
    }
}

impl From<Point> for Locator {
    fn from(point: Point) -> Self {
        Locator::Point(point)
    }
}

impl From<Rect> for Locator {
    fn from(rect: Rect) -> Self {
        Locator::Rect(rect)
    }
}

/// Callback invoked for every event the host has finished processing.
pub type EchoHandler = Arc<dyn Fn(&InputEvent) + Send + Sync>;

/// The host runtime the engine drives.
///
/// Implementations must deliver injected events to the application in
/// injection order and reflect each processed event back through every
/// registered echo handler. `pump` runs the host's event loop for at most
/// the given budget; it is the engine's only suspension point, so an
/// implementation must never require a second thread to make progress.
pub trait HostSurface: Send + Sync {
    /// The frame of the main surface in surface coordinates.
    fn surface_frame(&self) -> Rect;

    /// Touch capabilities of the simulated device.
    fn device_profile(&self) -> DeviceProfile;

    /// The routing token for the surface currently receiving events.
    fn current_context(&self) -> Result<ContextId, HostError>;

    /// Whether the surface can receive user-interaction events right now.
    fn is_ready_for_interaction(&self) -> bool;

    /// Whether the surface has key focus for keyboard events.
    fn is_key_surface(&self) -> bool;

    /// Resolves a locator to a concrete point on the surface.
    fn resolve_point(&self, locator: &Locator) -> Result<Point, HostError>;

    /// Whether a touch at this point would reach an interactable target.
    fn is_point_hittable(&self, point: Point) -> bool;

    /// Whether this point is within the visible region of the surface.
    fn is_point_visible(&self, point: Point) -> bool;

    /// Queues one event for delivery to the application.
    fn inject(&self, event: InputEvent, context: ContextId) -> Result<(), HostError>;

    /// Registers an observer for the host's processed-event feed.
    fn subscribe_echoes(&self, handler: EchoHandler);

    /// Runs the host event loop for at most `budget`.
    fn pump(&self, budget: Duration);
}

/// Pure observer of active contact locations, e.g. a debug overlay that
/// draws touch points over the surface under test.
pub trait TouchVisualizer: Send + Sync {
    /// A finger moved, landed (`Some`), or lifted (`None`).
    fn on_finger_update(&self, index: FingerIndex, location: Option<Point>);

    /// The stylus moved, landed (`Some`), or lifted (`None`).
    fn on_stylus_update(&self, location: Option<Point>);
}
