//! Clock port - source of the current time
//!
//! Prefix computation reads the time through this trait so tests can pin it.

/// Wall-clock abstraction
pub trait Clock {
    /// Seconds since the Unix epoch
    fn unix_timestamp(&self) -> i64;
}

/// Clock frozen at a given Unix timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_timestamp(&self) -> i64 {
        self.0
    }
}
