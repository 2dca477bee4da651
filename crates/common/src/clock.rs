//! Clock utilities for time-based identifiers.
//!
//! Clip ids and output file names are derived from wall-clock
//! milliseconds. Two clips created within the same millisecond must still
//! get distinct ids, so the id clock never hands out the same value twice
//! and never goes backwards, even if the system clock does.

use std::sync::atomic::{AtomicU64, Ordering};

/// Milliseconds since the Unix epoch, from the wall clock.
pub fn unix_millis() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// Monotonic generator of time-based ids.
#[derive(Debug, Default)]
pub struct IdClock {
    last: AtomicU64,
}

impl IdClock {
    /// Create a new id clock.
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Next id, based on the current wall clock.
    pub fn next_id(&self) -> u64 {
        self.next_after(unix_millis())
    }

    /// Next id given an observed wall-clock reading.
    ///
    /// Returns `now_ms` unless an equal or later id was already issued,
    /// in which case the previous id plus one is returned.
    pub fn next_after(&self, now_ms: u64) -> u64 {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = if now_ms > prev { now_ms } else { prev + 1 };
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }

    /// Last id handed out (0 if none).
    pub fn last_id(&self) -> u64 {
        self.last.load(Ordering::Relaxed)
    }
}

/// Process-wide id clock.
pub fn global_id_clock() -> &'static IdClock {
    static CLOCK: IdClock = IdClock::new();
    &CLOCK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_wall_clock() {
        let clock = IdClock::new();
        assert_eq!(clock.next_after(1_000), 1_000);
        assert_eq!(clock.next_after(2_000), 2_000);
        assert_eq!(clock.last_id(), 2_000);
    }

    #[test]
    fn test_ids_stay_unique_within_same_millisecond() {
        let clock = IdClock::new();
        let a = clock.next_after(5_000);
        let b = clock.next_after(5_000);
        let c = clock.next_after(4_999); // clock went backwards
        assert_eq!(a, 5_000);
        assert_eq!(b, 5_001);
        assert_eq!(c, 5_002);
    }

    #[test]
    fn test_global_clock_is_increasing() {
        let first = global_id_clock().next_id();
        let second = global_id_clock().next_id();
        assert!(second > first);
    }
}
