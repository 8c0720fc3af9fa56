//! SOS broadcast settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Location;

/// SOS broadcast settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SosSettings {
    /// Latitude used when no GPS fix is available
    #[serde(default = "default_fallback_lat")]
    pub fallback_lat: f64,

    /// Longitude used when no GPS fix is available
    #[serde(default = "default_fallback_lng")]
    pub fallback_lng: f64,

    /// Country calling code prepended to contact numbers (digits only)
    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// JSON list of known police stations used for nearest-station lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub police_directory: Option<PathBuf>,
}

fn default_fallback_lat() -> f64 {
    Location::FALLBACK.lat
}

fn default_fallback_lng() -> f64 {
    Location::FALLBACK.lng
}

fn default_country_code() -> String {
    "91".to_string()
}

impl SosSettings {
    pub fn fallback_location(&self) -> Location {
        Location::new(self.fallback_lat, self.fallback_lng)
    }
}

impl Default for SosSettings {
    fn default() -> Self {
        Self {
            fallback_lat: default_fallback_lat(),
            fallback_lng: default_fallback_lng(),
            country_code: default_country_code(),
            police_directory: None,
        }
    }
}
