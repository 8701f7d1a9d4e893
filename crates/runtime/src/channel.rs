//! Acknowledged event delivery.
//!
//! Events are injected one at a time through the host's single-threaded
//! queue. For acknowledged injections a vendor-defined marker event follows
//! the real event; once the marker's echo comes back through the host's
//! processed-event feed, everything injected before it has been fully
//! processed. Waiting pumps the host loop cooperatively instead of blocking
//! the thread that must deliver the acknowledgment.

use crate::build::build_marker_event;
use crate::clock::MonotonicClock;
use crate::error::GestureError;
use crate::ids::EventIdAllocator;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tactile_core::event::InputEvent;
use tactile_core::host::HostSurface;
use tracing::{debug, warn};

/// Largest single pump while waiting for an acknowledgment, so the timeout
/// deadline is checked at a reasonable rate.
const PUMP_SLICE: Duration = Duration::from_millis(1);

type PendingCallbacks = Arc<Mutex<HashMap<u32, Arc<AtomicBool>>>>;

pub(crate) struct DeliveryChannel {
    host: Arc<dyn HostSurface>,
    ids: Arc<EventIdAllocator>,
    clock: MonotonicClock,
    sender_id: u64,
    ack_timeout: Duration,
    pending: PendingCallbacks,
}

impl DeliveryChannel {
    pub(crate) fn new(
        host: Arc<dyn HostSurface>,
        ids: Arc<EventIdAllocator>,
        clock: MonotonicClock,
        sender_id: u64,
        ack_timeout: Duration,
    ) -> Self {
        let pending: PendingCallbacks = Arc::new(Mutex::new(HashMap::new()));

        let observed = Arc::clone(&pending);
        host.subscribe_echoes(Arc::new(move |event| {
            if let InputEvent::Marker(marker) = event {
                let completion = lock(&observed).remove(&marker.correlation_id);
                if let Some(flag) = completion {
                    flag.store(true, Ordering::SeqCst);
                }
            }
        }));

        Self { host, ids, clock, sender_id, ack_timeout, pending }
    }

    /// Injects one event, optionally waiting until the host has fully
    /// processed it. The target context is resolved before anything is
    /// injected so routing failures cannot leave a half-delivered event.
    pub(crate) fn inject(
        &self,
        event: InputEvent,
        await_completion: bool,
    ) -> Result<(), GestureError> {
        let context = self.host.current_context()?;
        self.host.inject(event, context)?;

        if await_completion {
            self.wait_for_processing()?;
        }

        Ok(())
    }

    /// Sends a marker through the same queue and pumps the host loop until
    /// its echo is observed.
    fn wait_for_processing(&self) -> Result<(), GestureError> {
        let correlation_id = self.ids.next();
        let flag = Arc::new(AtomicBool::new(false));
        lock(&self.pending).insert(correlation_id, Arc::clone(&flag));

        let marker = build_marker_event(correlation_id, self.clock.now_ns(), self.sender_id);
        let context = self.host.current_context()?;
        self.host.inject(InputEvent::Marker(marker), context)?;
        debug!(correlation_id, "marker injected, awaiting echo");

        let deadline = Instant::now() + self.ack_timeout;
        while !flag.load(Ordering::SeqCst) {
            let now = Instant::now();
            if now >= deadline {
                lock(&self.pending).remove(&correlation_id);
                warn!(correlation_id, timeout = ?self.ack_timeout, "event delivery not acknowledged");
                return Err(GestureError::DeliveryTimeout { timeout: self.ack_timeout });
            }
            self.host.pump((deadline - now).min(PUMP_SLICE));
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }
}

fn lock(pending: &PendingCallbacks) -> MutexGuard<'_, HashMap<u32, Arc<AtomicBool>>> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build_marker_event;
    use tactile_core::host::DeviceProfile;
    use tactile_host_mock::MockHost;

    fn channel_for(host: &Arc<MockHost>, ack_timeout: Duration) -> DeliveryChannel {
        DeliveryChannel::new(
            Arc::clone(host) as Arc<dyn HostSurface>,
            Arc::new(EventIdAllocator::new()),
            MonotonicClock::start(),
            0x1234,
            ack_timeout,
        )
    }

    fn payload() -> InputEvent {
        // Correlation id 0 is never issued, so the echo observer ignores it.
        InputEvent::Marker(build_marker_event(0, 0, 0x1234))
    }

    #[test]
    fn acknowledged_injection_completes_and_clears_pending() {
        let host = Arc::new(MockHost::new(DeviceProfile::phone()));
        let channel = channel_for(&host, Duration::from_millis(200));

        channel.inject(payload(), true).unwrap();
        assert_eq!(channel.pending_count(), 0);
        // The payload plus its marker were both processed.
        assert_eq!(host.processed_count(), 2);
    }

    #[test]
    fn fire_and_forget_returns_without_pumping() {
        let host = Arc::new(MockHost::new(DeviceProfile::phone()));
        let channel = channel_for(&host, Duration::from_millis(200));

        channel.inject(payload(), false).unwrap();
        assert_eq!(host.queued_count(), 1);
        assert_eq!(host.processed_count(), 0);
    }

    #[test]
    fn missing_acknowledgment_times_out_and_clears_pending() {
        let host = Arc::new(MockHost::new(DeviceProfile::phone()));
        let timeout = Duration::from_millis(30);
        let channel = channel_for(&host, timeout);

        host.set_echoes_enabled(false);
        let error = channel.inject(payload(), true).unwrap_err();
        assert_eq!(error, GestureError::DeliveryTimeout { timeout });
        assert_eq!(channel.pending_count(), 0);
    }

    #[test]
    fn routing_is_resolved_before_anything_is_injected() {
        let host = Arc::new(MockHost::new(DeviceProfile::phone()));
        let channel = channel_for(&host, Duration::from_millis(200));

        host.set_context_available(false);
        let error = channel.inject(payload(), true).unwrap_err();
        assert_eq!(error, GestureError::Host(tactile_core::HostError::ContextUnavailable));
        assert_eq!(host.queued_count(), 0);
    }
}
