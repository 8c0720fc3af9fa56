//! Time-of-day safety index

use std::sync::Arc;

use crate::clock::Clock;
use crate::{Location, SafetyAssessment, SafetyStatus};

/// Bucketed index for an hour of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrisIndex {
    pub status: SafetyStatus,
    pub label: &'static str,
    pub color: &'static str,
}

/// Map an hour (0-23) to its index bucket
pub fn iris_index(hour: u32) -> IrisIndex {
    match hour {
        6..=17 => IrisIndex {
            status: SafetyStatus::Safe,
            label: "SAFE 🟢",
            color: "emerald",
        },
        18..=20 => IrisIndex {
            status: SafetyStatus::Caution,
            label: "CAUTION 🟡",
            color: "amber",
        },
        _ => IrisIndex {
            status: SafetyStatus::Danger,
            label: "RISK 🔴",
            color: "rose",
        },
    }
}

/// Night-risk window used for the spoken warning: 21:00 through 05:59
pub fn is_night(hour: u32) -> bool {
    hour >= 21 || hour <= 5
}

/// Produces a safety assessment for a location
pub trait SafetyIndex: Send + Sync {
    fn assess(&self, location: Location) -> SafetyAssessment;
}

/// Safety index driven purely by the local hour
pub struct TimeOfDayIndex {
    clock: Arc<dyn Clock>,
}

impl TimeOfDayIndex {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl SafetyIndex for TimeOfDayIndex {
    fn assess(&self, _location: Location) -> SafetyAssessment {
        let index = iris_index(self.clock.local_hour());

        let (message, score) = match index.status {
            SafetyStatus::Safe => (
                "Daylight hours. Area visibility is high. Parameters optimal.",
                90,
            ),
            SafetyStatus::Caution => (
                "Evening hours. Public density decreasing. Stay alert.",
                50,
            ),
            SafetyStatus::Danger => (
                "Night-time protocol active. High-risk period. Stay in lit paths.",
                20,
            ),
        };

        let danger = index.status == SafetyStatus::Danger;

        SafetyAssessment {
            status: index.status,
            label: index.label.to_string(),
            message: message.to_string(),
            score,
            priority: if danger { "High" } else { "Normal" }.to_string(),
            color_tag: index.color.to_string(),
            vibration_pattern: if danger { vec![1000] } else { vec![200] },
        }
    }
}
