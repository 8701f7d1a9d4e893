//! Finger and multi-finger gesture surface of the generator.
//!
//! Everything here composes the base Began/Moved/Ended primitives; each
//! primitive goes through acknowledged delivery, so the host has fully
//! processed step k before step k+1 is injected.

use crate::curve::{ease, ease_point};
use crate::error::GestureError;
use crate::generator::EventGenerator;
use std::time::{Duration, Instant};
use tactile_core::host::Locator;
use tactile_core::touch::{FingerIndex, HandInfo, TouchPhase};
use tactile_core::types::Point;

fn explicit(indices: &[FingerIndex]) -> Vec<Option<FingerIndex>> {
    indices.iter().copied().map(Some).collect()
}

impl EventGenerator {
    // MARK: - Base actions

    /// Touches one finger down. `None` picks the next unused finger index
    /// and the center of the surface.
    pub fn finger_down(
        &mut self,
        index: Option<FingerIndex>,
        at: Option<&Locator>,
    ) -> Result<(), GestureError> {
        let location = at.cloned().unwrap_or(Locator::Surface);
        self.finger_down_many(&[index], &[location])
    }

    /// Touches several fingers down at once; indices must match the number
    /// of locations.
    pub fn finger_down_many(
        &mut self,
        indices: &[Option<FingerIndex>],
        at: &[Locator],
    ) -> Result<(), GestureError> {
        let indices = self.fill_next_finger_indices(indices, at.len())?;
        let locations = self.resolve_all(at)?;

        let fingers = indices
            .iter()
            .zip(&locations)
            .map(|(index, location)| self.finger_info(*index, *location, TouchPhase::Began))
            .collect();
        self.send_hand_event(HandInfo::new(fingers))
    }

    /// Lifts one finger. `None` lifts the finger that went down last.
    pub fn finger_up(&mut self, index: Option<FingerIndex>) -> Result<(), GestureError> {
        self.finger_up_many(&[index])
    }

    /// Lifts several fingers at their current locations.
    pub fn finger_up_many(
        &mut self,
        indices: &[Option<FingerIndex>],
    ) -> Result<(), GestureError> {
        let indices = self.fill_existing_finger_indices(indices, 1)?;

        let mut fingers = Vec::with_capacity(indices.len());
        for index in &indices {
            let location = self.active_location(*index)?;
            fingers.push(self.finger_info(*index, location, TouchPhase::Ended));
        }
        self.send_hand_event(HandInfo::new(fingers))
    }

    /// Moves one active finger to a new location in a single step.
    pub fn finger_move(
        &mut self,
        index: Option<FingerIndex>,
        to: &Locator,
    ) -> Result<(), GestureError> {
        self.finger_move_many(&[index], std::slice::from_ref(to))
    }

    /// Moves several active fingers in one composite event.
    pub fn finger_move_many(
        &mut self,
        indices: &[Option<FingerIndex>],
        to: &[Locator],
    ) -> Result<(), GestureError> {
        let indices = self.fill_existing_finger_indices(indices, to.len())?;
        if indices.len() != to.len() {
            return Err(GestureError::InvalidFingerCount {
                count: indices.len(),
                expected: to.len(),
            });
        }

        let locations = self.resolve_all(to)?;
        self.move_fingers_to_points(&indices, &locations)
    }

    /// Moves one finger over a duration, interpolating along the easing
    /// curve at the display frame rate.
    pub fn finger_move_over(
        &mut self,
        index: Option<FingerIndex>,
        to: &Locator,
        duration: Duration,
    ) -> Result<(), GestureError> {
        self.finger_move_many_over(&[index], std::slice::from_ref(to), duration)
    }

    /// Moves several fingers over a duration. The final emission lands
    /// exactly on the targets regardless of sampling, so the contacts never
    /// stop short of the intended endpoint.
    pub fn finger_move_many_over(
        &mut self,
        indices: &[Option<FingerIndex>],
        to: &[Locator],
        duration: Duration,
    ) -> Result<(), GestureError> {
        if duration.is_zero() {
            return self.finger_move_many(indices, to);
        }

        let indices = self.fill_existing_finger_indices(indices, to.len())?;
        if indices.len() != to.len() {
            return Err(GestureError::InvalidFingerCount {
                count: indices.len(),
                expected: to.len(),
            });
        }

        let targets = self.resolve_all(to)?;
        let mut starts = Vec::with_capacity(indices.len());
        for index in &indices {
            starts.push(self.active_location(*index)?);
        }

        let interval = self.settings().finger_move_interval;
        let started = Instant::now();
        loop {
            let elapsed = started.elapsed();
            if elapsed + interval >= duration {
                break;
            }

            let fraction = elapsed.as_secs_f64() / duration.as_secs_f64();
            let next: Vec<Point> = starts
                .iter()
                .zip(&targets)
                .map(|(start, target)| ease_point(*start, *target, fraction))
                .collect();
            self.move_fingers_to_points(&indices, &next)?;
            self.wait(interval)?;
        }

        self.move_fingers_to_points(&indices, &targets)
    }

    /// Touches down, moves to the end point over the duration, lifts.
    pub fn finger_drag(
        &mut self,
        index: Option<FingerIndex>,
        from: &Locator,
        to: &Locator,
        duration: Duration,
    ) -> Result<(), GestureError> {
        let index = self.fill_next_finger_indices(&[index], 1)?[0];
        self.finger_down(Some(index), Some(from))?;
        self.finger_move_over(Some(index), to, duration)?;
        self.finger_up(Some(index))
    }

    // MARK: - Taps

    /// A single tap: down, finger-lift delay, up.
    pub fn finger_tap(
        &mut self,
        index: Option<FingerIndex>,
        at: Option<&Locator>,
    ) -> Result<(), GestureError> {
        self.finger_tap_count(index, at, 1, None)
    }

    /// Taps a number of times with an interval between taps.
    pub fn finger_tap_count(
        &mut self,
        index: Option<FingerIndex>,
        at: Option<&Locator>,
        count: u32,
        interval: Option<Duration>,
    ) -> Result<(), GestureError> {
        let interval = interval.unwrap_or(self.settings().multi_tap_interval);
        for tap in 0..count {
            self.finger_down(index, at)?;
            self.wait(self.settings().finger_lift_delay)?;
            self.finger_up(index)?;
            if tap + 1 < count {
                self.wait(interval)?;
            }
        }
        Ok(())
    }

    pub fn finger_double_tap(
        &mut self,
        index: Option<FingerIndex>,
        at: Option<&Locator>,
    ) -> Result<(), GestureError> {
        self.finger_tap_count(index, at, 2, None)
    }

    /// Holds a finger down for the duration before lifting.
    pub fn finger_long_press(
        &mut self,
        index: Option<FingerIndex>,
        at: Option<&Locator>,
        duration: Option<Duration>,
    ) -> Result<(), GestureError> {
        let duration = duration.unwrap_or(self.settings().long_press_hold_delay);
        self.finger_down(index, at)?;
        self.wait(duration)?;
        self.finger_up(index)
    }

    // MARK: - Two-finger actions

    /// Touches two fingers down symmetrically around a center point.
    /// An angle of zero puts the fingers on a horizontal line; positive
    /// angles rotate clockwise.
    pub fn two_finger_down(
        &mut self,
        indices: &[Option<FingerIndex>],
        at: Option<&Locator>,
        distance: Option<f64>,
        angle: f64,
    ) -> Result<(), GestureError> {
        let indices = self.fill_next_finger_indices(indices, 2)?;
        let center = self.resolve_location_or_surface(at)?;
        let distance = distance.unwrap_or(self.settings().two_finger_distance);
        let points = center.two_way_offset(distance, angle);
        self.finger_down_many(
            &explicit(&indices),
            &[Locator::Point(points[0]), Locator::Point(points[1])],
        )
    }

    /// Lifts two fingers; unqualified, the two that went down last.
    pub fn two_finger_up(
        &mut self,
        indices: &[Option<FingerIndex>],
    ) -> Result<(), GestureError> {
        let indices = self.fill_existing_finger_indices(indices, 2)?;
        self.finger_up_many(&explicit(&indices))
    }

    /// Moves two active fingers to a new center, distance and angle.
    pub fn two_finger_move(
        &mut self,
        indices: &[Option<FingerIndex>],
        to: &Locator,
        distance: Option<f64>,
        angle: f64,
    ) -> Result<(), GestureError> {
        let indices = self.fill_existing_finger_indices(indices, 2)?;
        let center = self.resolve_location(to)?;
        let distance = distance.unwrap_or(self.settings().two_finger_distance);
        let points = center.two_way_offset(distance, angle);
        self.finger_move_many(
            &explicit(&indices),
            &[Locator::Point(points[0]), Locator::Point(points[1])],
        )
    }

    /// Like [`two_finger_move`](Self::two_finger_move), interpolated over a
    /// duration.
    pub fn two_finger_move_over(
        &mut self,
        indices: &[Option<FingerIndex>],
        to: &Locator,
        distance: Option<f64>,
        angle: f64,
        duration: Duration,
    ) -> Result<(), GestureError> {
        let indices = self.fill_existing_finger_indices(indices, 2)?;
        let center = self.resolve_location(to)?;
        let distance = distance.unwrap_or(self.settings().two_finger_distance);
        let points = center.two_way_offset(distance, angle);
        self.finger_move_many_over(
            &explicit(&indices),
            &[Locator::Point(points[0]), Locator::Point(points[1])],
            duration,
        )
    }

    /// Two-finger tap around a center point.
    pub fn two_finger_tap(
        &mut self,
        indices: &[Option<FingerIndex>],
        at: Option<&Locator>,
        distance: Option<f64>,
        angle: f64,
    ) -> Result<(), GestureError> {
        let indices = self.fill_next_finger_indices(indices, 2)?;
        self.two_finger_down(&explicit(&indices), at, distance, angle)?;
        self.wait(self.settings().finger_lift_delay)?;
        self.two_finger_up(&explicit(&indices))
    }

    // MARK: - Pinch

    /// Two-finger pinch from one distance to another around a center,
    /// interpolated over the duration.
    pub fn finger_pinch(
        &mut self,
        indices: &[Option<FingerIndex>],
        at: Option<&Locator>,
        from_distance: f64,
        to_distance: f64,
        angle: f64,
        duration: Duration,
    ) -> Result<(), GestureError> {
        let indices = self.fill_next_finger_indices(indices, 2)?;
        let center = self.resolve_location_or_surface(at)?;
        let starts = center.two_way_offset(from_distance, angle);
        let ends = center.two_way_offset(to_distance, angle);

        let indices = explicit(&indices);
        self.finger_down_many(
            &indices,
            &[Locator::Point(starts[0]), Locator::Point(starts[1])],
        )?;
        self.finger_move_many_over(
            &indices,
            &[Locator::Point(ends[0]), Locator::Point(ends[1])],
            duration,
        )?;
        self.finger_up_many(&indices)
    }

    /// Pinch outwards, from the small to the large default distance.
    pub fn finger_pinch_open(
        &mut self,
        indices: &[Option<FingerIndex>],
        at: Option<&Locator>,
        duration: Option<Duration>,
    ) -> Result<(), GestureError> {
        let duration = duration.unwrap_or(self.settings().pinch_duration);
        self.finger_pinch(
            indices,
            at,
            self.settings().pinch_small_distance,
            self.settings().pinch_large_distance,
            0.0,
            duration,
        )
    }

    /// Pinch inwards, from the large to the small default distance.
    pub fn finger_pinch_close(
        &mut self,
        indices: &[Option<FingerIndex>],
        at: Option<&Locator>,
        duration: Option<Duration>,
    ) -> Result<(), GestureError> {
        let duration = duration.unwrap_or(self.settings().pinch_duration);
        self.finger_pinch(
            indices,
            at,
            self.settings().pinch_large_distance,
            self.settings().pinch_small_distance,
            0.0,
            duration,
        )
    }

    // MARK: - Rotation

    /// Rotates the active fingers around an anchor in one step. Each finger
    /// pivots independently, preserving relative separation.
    pub fn finger_pivot(
        &mut self,
        indices: &[Option<FingerIndex>],
        anchor: &Locator,
        angle: f64,
    ) -> Result<(), GestureError> {
        let indices = self.fill_existing_finger_indices(indices, 1)?;
        let anchor = self.resolve_location(anchor)?;

        let mut targets = Vec::with_capacity(indices.len());
        for index in &indices {
            let location = self.active_location(*index)?;
            targets.push(Locator::Point(location.pivot(anchor, angle)));
        }
        self.finger_move_many(&explicit(&indices), &targets)
    }

    /// Rotates the active fingers around an anchor, easing the angle over
    /// the duration.
    pub fn finger_pivot_over(
        &mut self,
        indices: &[Option<FingerIndex>],
        anchor: &Locator,
        angle: f64,
        duration: Duration,
    ) -> Result<(), GestureError> {
        if duration.is_zero() {
            return self.finger_pivot(indices, anchor, angle);
        }

        let indices = self.fill_existing_finger_indices(indices, 1)?;
        let anchor = self.resolve_location(anchor)?;
        let mut starts = Vec::with_capacity(indices.len());
        for index in &indices {
            starts.push(self.active_location(*index)?);
        }

        let interval = self.settings().finger_move_interval;
        let started = Instant::now();
        loop {
            let elapsed = started.elapsed();
            if elapsed + interval >= duration {
                break;
            }

            let fraction = elapsed.as_secs_f64() / duration.as_secs_f64();
            let eased = ease(0.0, angle, fraction);
            let next: Vec<Point> =
                starts.iter().map(|start| start.pivot(anchor, eased)).collect();
            self.move_fingers_to_points(&indices, &next)?;
            self.wait(interval)?;
        }

        let finals: Vec<Point> = starts.iter().map(|start| start.pivot(anchor, angle)).collect();
        self.move_fingers_to_points(&indices, &finals)
    }

    /// Full rotation gesture: down at the start angle, pivot to the end
    /// angle over the duration, up.
    pub fn finger_rotate(
        &mut self,
        indices: &[Option<FingerIndex>],
        at: Option<&Locator>,
        distance: Option<f64>,
        from_angle: f64,
        to_angle: f64,
        duration: Duration,
    ) -> Result<(), GestureError> {
        let indices = self.fill_next_finger_indices(indices, 2)?;
        let center = self.resolve_location_or_surface(at)?;
        let distance = distance.unwrap_or(self.settings().rotation_distance);
        let starts = center.two_way_offset(distance, from_angle);

        let indices = explicit(&indices);
        self.finger_down_many(
            &indices,
            &[Locator::Point(starts[0]), Locator::Point(starts[1])],
        )?;
        self.finger_pivot_over(
            &indices,
            &Locator::Point(center),
            to_angle - from_angle,
            duration,
        )?;
        self.finger_up_many(&indices)
    }

    /// Rotation starting from a horizontal line of fingers.
    pub fn finger_rotate_by(
        &mut self,
        indices: &[Option<FingerIndex>],
        at: Option<&Locator>,
        distance: Option<f64>,
        angle: f64,
        duration: Duration,
    ) -> Result<(), GestureError> {
        self.finger_rotate(indices, at, distance, 0.0, angle, duration)
    }

    // MARK: - Helpers

    fn resolve_all(&self, locators: &[Locator]) -> Result<Vec<Point>, GestureError> {
        locators.iter().map(|locator| self.resolve_location(locator)).collect()
    }

    fn move_fingers_to_points(
        &mut self,
        indices: &[FingerIndex],
        points: &[Point],
    ) -> Result<(), GestureError> {
        let fingers = indices
            .iter()
            .zip(points)
            .map(|(index, point)| self.finger_info(*index, *point, TouchPhase::Moved))
            .collect();
        self.send_hand_event(HandInfo::new(fingers))
    }
}
