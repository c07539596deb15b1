//! # Clock
//!
//! The only source of "now" in quickcart-core. Expiry is evaluated against
//! a `Clock` so tests can pin time instead of racing the wall clock.

use chrono::{DateTime, Utc};

/// Supplies the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system wall clock on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_is_stable() {
        let instant = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        let first = clock.now();
        assert!(clock.now() >= first);
    }
}
