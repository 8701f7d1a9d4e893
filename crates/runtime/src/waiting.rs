//! Cooperative waiting primitives.
//!
//! Waiting never blocks the thread: the host's event loop is pumped for the
//! remaining budget, so queued events keep flowing while test code appears
//! to sleep. Every wait carries an explicit timeout and surfaces expiry as
//! a typed error instead of hanging.

use crate::error::GestureError;
use crate::generator::EventGenerator;
use std::time::{Duration, Instant};
use tactile_core::host::Locator;

impl EventGenerator {
    /// Waits for an interval while the host keeps processing events.
    pub fn wait(&self, interval: Duration) -> Result<(), GestureError> {
        let deadline = Instant::now() + interval;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            self.host().pump(deadline - now);
        }
    }

    /// Waits until a condition returns true, polling at the configured
    /// check interval.
    pub fn wait_until(
        &self,
        mut condition: impl FnMut() -> bool,
        timeout: Duration,
    ) -> Result<(), GestureError> {
        let started = Instant::now();
        while !condition() {
            if started.elapsed() > timeout {
                return Err(GestureError::WaitConditionTimeout { timeout });
            }
            self.wait(self.settings().check_interval)?;
        }
        Ok(())
    }

    /// Waits until a closure produces a value and returns it.
    pub fn wait_until_exists<T>(
        &self,
        mut produce: impl FnMut() -> Option<T>,
        timeout: Duration,
    ) -> Result<T, GestureError> {
        let started = Instant::now();
        loop {
            if let Some(value) = produce() {
                return Ok(value);
            }

            if started.elapsed() > timeout {
                return Err(GestureError::WaitConditionTimeout { timeout });
            }

            self.wait(self.settings().check_interval)?;
        }
    }

    /// Waits until the locator resolves to a hittable point. A locator
    /// that does not resolve yet (e.g. a view not added so far) keeps
    /// being polled until the timeout.
    pub fn wait_until_hittable(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<(), GestureError> {
        self.wait_until(
            || match self.host().resolve_point(locator) {
                Ok(point) => self.host().is_point_hittable(point),
                Err(_) => false,
            },
            timeout,
        )
    }

    /// Waits until the locator resolves to a visible point.
    pub fn wait_until_visible(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<(), GestureError> {
        self.wait_until(
            || match self.host().resolve_point(locator) {
                Ok(point) => self.host().is_point_visible(point),
                Err(_) => false,
            },
            timeout,
        )
    }
}
