//! System clock backed by `chrono`

use chrono::Utc;

use crate::domain::ports::Clock;

/// Reads the real wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        Utc::now().timestamp()
    }
}
