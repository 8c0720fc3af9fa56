use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Location;

/// Who an SOS broadcast is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SosCategory {
    #[default]
    Family,
    Police,
}

impl std::fmt::Display for SosCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SosCategory::Family => write!(f, "family"),
            SosCategory::Police => write!(f, "police"),
        }
    }
}

/// A per-contact deep link produced by a broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationLink {
    pub contact_name: String,
    pub link: String,
}

/// Outcome of an SOS broadcast
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SosDispatchResult {
    pub success: bool,
    pub dispatched_count: usize,
    pub notification_links: Vec<NotificationLink>,
}

/// History entry recorded after a successful broadcast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SosLog {
    pub timestamp: DateTime<Utc>,
    pub category: SosCategory,
    pub location: Location,
    pub contacts_notified: Vec<String>,
    /// Audio captured right after the broadcast, if a recorder was available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_recording_id: Option<String>,
}

/// A police station near the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoliceStation {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Human-readable distance from the user, e.g. "1.2 km"
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl PoliceStation {
    pub fn location(&self) -> Location {
        Location::new(self.lat, self.lng)
    }
}
