//! Time sources for record timestamps and inter-packet deltas.

use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};
use parking_lot::Mutex;

/// Wall clock plus a monotonic counter.
pub trait Clock: Send + Sync {
    /// Local wall-clock time.
    fn wall(&self) -> NaiveDateTime;

    /// Monotonic time since an arbitrary fixed origin.
    fn monotonic(&self) -> Duration;
}

/// The system clocks.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose monotonic origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn wall(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn monotonic(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock; both readings move together on [`advance`](Self::advance).
#[derive(Debug)]
pub struct ManualClock {
    state: Mutex<(NaiveDateTime, Duration)>,
}

impl ManualClock {
    /// Start at `wall`, with the monotonic reading at zero.
    pub fn new(wall: NaiveDateTime) -> Self {
        Self {
            state: Mutex::new((wall, Duration::ZERO)),
        }
    }

    /// Move both clocks forward.
    pub fn advance(&self, by: Duration) {
        let mut state = self.state.lock();
        let step = chrono::Duration::from_std(by).unwrap_or_else(|_| chrono::Duration::zero());
        state.0 += step;
        state.1 += by;
    }
}

impl Clock for ManualClock {
    fn wall(&self) -> NaiveDateTime {
        self.state.lock().0
    }

    fn monotonic(&self) -> Duration {
        self.state.lock().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_manual_clock_advances_both() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 900)
            .unwrap();
        let clock = ManualClock::new(start);
        clock.advance(Duration::from_millis(250));

        assert_eq!(clock.monotonic(), Duration::from_millis(250));
        assert_eq!(
            clock.wall().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            "2024-03-02 00:00:00.150"
        );
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.monotonic();
        let b = clock.monotonic();
        assert!(b >= a);
    }
}
