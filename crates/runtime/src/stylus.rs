//! Stylus gesture surface of the generator.
//!
//! A device tracks at most one stylus contact; its pressure, altitude and
//! azimuth interpolate along the same easing curve as its location.

use crate::curve::{ease, ease_point};
use crate::error::GestureError;
use crate::generator::EventGenerator;
use std::time::{Duration, Instant};
use tactile_core::host::Locator;
use tactile_core::touch::{StylusInfo, TouchPhase};

/// Pen attributes for a stylus event. `altitude` is in radians where 0 is
/// straight down into the glass; `azimuth` is in radians where 0 is true
/// north.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct StylusAttributes {
    pub pressure: f64,
    pub altitude: f64,
    pub azimuth: f64,
}

impl StylusAttributes {
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = altitude;
        self
    }

    pub fn with_azimuth(mut self, azimuth: f64) -> Self {
        self.azimuth = azimuth;
        self
    }
}

impl EventGenerator {
    // MARK: - Base actions

    /// Touches the stylus down. `None` targets the center of the surface.
    pub fn stylus_down(
        &mut self,
        at: Option<&Locator>,
        attributes: StylusAttributes,
    ) -> Result<(), GestureError> {
        let location = self.resolve_location_or_surface(at)?;
        self.send_stylus_event(StylusInfo {
            location,
            phase: TouchPhase::Began,
            pressure: attributes.pressure,
            twist: 0.0,
            altitude: attributes.altitude,
            azimuth: attributes.azimuth,
        })
    }

    /// Lifts the stylus at its current location.
    pub fn stylus_up(&mut self) -> Result<(), GestureError> {
        let location = self.touches.stylus().map(|stylus| stylus.location);
        let location = location.ok_or(GestureError::StylusNotActive)?;
        self.send_stylus_event(StylusInfo {
            location,
            phase: TouchPhase::Ended,
            pressure: 0.0,
            twist: 0.0,
            altitude: 0.0,
            azimuth: 0.0,
        })
    }

    /// Moves the active stylus in a single step.
    pub fn stylus_move(
        &mut self,
        to: &Locator,
        attributes: StylusAttributes,
    ) -> Result<(), GestureError> {
        let location = self.resolve_location(to)?;
        self.send_stylus_event(StylusInfo {
            location,
            phase: TouchPhase::Moved,
            pressure: attributes.pressure,
            twist: 0.0,
            altitude: attributes.altitude,
            azimuth: attributes.azimuth,
        })
    }

    /// Moves the active stylus over a duration, interpolating location,
    /// pressure, altitude and azimuth along the easing curve. Ends exactly
    /// at the target values.
    pub fn stylus_move_over(
        &mut self,
        to: &Locator,
        attributes: StylusAttributes,
        duration: Duration,
    ) -> Result<(), GestureError> {
        if duration.is_zero() {
            return self.stylus_move(to, attributes);
        }

        let existing = *self.touches.stylus().ok_or(GestureError::StylusNotActive)?;
        let target = self.resolve_location(to)?;

        let interval = self.settings().finger_move_interval;
        let started = Instant::now();
        loop {
            let elapsed = started.elapsed();
            if elapsed + interval >= duration {
                break;
            }

            let fraction = elapsed.as_secs_f64() / duration.as_secs_f64();
            let next = StylusAttributes {
                pressure: ease(existing.pressure, attributes.pressure, fraction),
                altitude: ease(existing.altitude, attributes.altitude, fraction),
                azimuth: ease(existing.azimuth, attributes.azimuth, fraction),
            };
            let location = ease_point(existing.location, target, fraction);
            self.stylus_move(&Locator::Point(location), next)?;
            self.wait(interval)?;
        }

        self.stylus_move(&Locator::Point(target), attributes)
    }

    // MARK: - Taps

    /// A single stylus tap.
    pub fn stylus_tap(
        &mut self,
        at: Option<&Locator>,
        attributes: StylusAttributes,
    ) -> Result<(), GestureError> {
        self.stylus_tap_count(at, attributes, 1, None)
    }

    /// Taps the stylus a number of times with an interval between taps.
    pub fn stylus_tap_count(
        &mut self,
        at: Option<&Locator>,
        attributes: StylusAttributes,
        count: u32,
        interval: Option<Duration>,
    ) -> Result<(), GestureError> {
        let interval = interval.unwrap_or(self.settings().multi_tap_interval);
        for tap in 0..count {
            self.stylus_down(at, attributes)?;
            self.wait(self.settings().finger_lift_delay)?;
            self.stylus_up()?;
            if tap + 1 < count {
                self.wait(interval)?;
            }
        }
        Ok(())
    }

    pub fn stylus_double_tap(
        &mut self,
        at: Option<&Locator>,
        attributes: StylusAttributes,
    ) -> Result<(), GestureError> {
        self.stylus_tap_count(at, attributes, 2, None)
    }

    /// Holds the stylus down for the duration before lifting.
    pub fn stylus_long_press(
        &mut self,
        at: Option<&Locator>,
        attributes: StylusAttributes,
        duration: Option<Duration>,
    ) -> Result<(), GestureError> {
        let duration = duration.unwrap_or(self.settings().long_press_hold_delay);
        self.stylus_down(at, attributes)?;
        self.wait(duration)?;
        self.stylus_up()
    }
}
