//! Wall-clock access
//!
//! The safety index and the night-risk warning depend on the local hour.
//! Everything that needs the time goes through [`Clock`] so tests can pin it.

use chrono::{DateTime, Local, Timelike, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current instant (UTC)
    fn now(&self) -> DateTime<Utc>;

    /// Hour of day (0-23) in the device's local timezone
    fn local_hour(&self) -> u32;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_hour(&self) -> u32 {
        Local::now().hour()
    }
}

/// Clock frozen at a given local hour
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub hour: u32,
    pub at: DateTime<Utc>,
}

impl FixedClock {
    pub fn at_hour(hour: u32) -> Self {
        Self {
            hour: hour % 24,
            at: DateTime::<Utc>::default(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }

    fn local_hour(&self) -> u32 {
        self.hour
    }
}
