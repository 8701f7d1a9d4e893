use std::sync::atomic::{AtomicU32, Ordering};

/// Issues event and contact identifiers.
///
/// Values are strictly increasing and start at 1, so an identifier is never
/// confused with an unset field on the wire. Each generator owns one
/// allocator shared with its delivery channel; identifiers double as marker
/// correlation ids, which keeps pending-acknowledgment keys unique without
/// extra bookkeeping. Atomic because the echo-observation path may run on a
/// different scheduling turn than the gesture-issuing path.
#[derive(Debug, Default)]
pub struct EventIdAllocator {
    latest: AtomicU32,
}

impl EventIdAllocator {
    pub const fn new() -> Self {
        Self { latest: AtomicU32::new(0) }
    }

    /// Returns the next identifier, strictly greater than all previous ones.
    pub fn next(&self) -> u32 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The most recently issued identifier, 0 if none was issued yet.
    pub fn latest(&self) -> u32 {
        self.latest.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_start_at_one_and_increase() {
        let ids = EventIdAllocator::new();
        assert_eq!(ids.latest(), 0);
        assert_eq!(ids.next(), 1);
        assert_eq!(ids.next(), 2);
        assert_eq!(ids.latest(), 2);
    }

    #[test]
    fn identifiers_are_pairwise_distinct() {
        let ids = EventIdAllocator::new();
        let issued: Vec<u32> = (0..100).map(|_| ids.next()).collect();
        let mut sorted = issued.clone();
        sorted.dedup();
        assert_eq!(sorted.len(), issued.len());
        assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
