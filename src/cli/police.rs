//! Police command implementation

use anyhow::{Result, bail};

use iris::config::Config;
use iris::messaging::{MapsPoliceLocator, police_search_link};
use iris::voice::PoliceLocator;

use super::LocationArgs;

/// List the nearest known police stations
pub async fn police_command(config: &Config, location: LocationArgs) -> Result<()> {
    let Some(fix) = location.fix() else {
        bail!("GPS not available. Pass --lat and --lng.");
    };

    let locator = MapsPoliceLocator::from_optional_file(config.sos.police_directory.as_deref());
    let stations = locator.stations(fix).await;
    if stations.is_empty() {
        println!("No known stations nearby. Search the map instead:");
        println!("  {}", police_search_link(fix));
        return Ok(());
    }

    for station in stations {
        println!("{} ({}, {})", station.name, station.distance, station.duration);
        if !station.phone.is_empty() {
            println!("  Phone:   {}", station.phone);
        }
        if !station.address.is_empty() {
            println!("  Address: {}", station.address);
        }
    }

    Ok(())
}
