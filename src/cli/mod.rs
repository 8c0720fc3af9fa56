//! CLI command implementations

pub mod area;
pub mod contacts;
pub mod init;
pub mod listen;
pub mod logs;
pub mod police;
pub mod register;
pub mod sos;

use clap::Args;
use iris::Location;

/// Manual GPS fix for commands that need a location
#[derive(Debug, Clone, Copy, Args)]
pub struct LocationArgs {
    /// Latitude of the current position
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude of the current position
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,
}

impl LocationArgs {
    pub fn fix(&self) -> Option<Location> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Location::new(lat, lng)),
            _ => None,
        }
    }
}
