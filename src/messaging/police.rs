//! Police station lookup

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

use super::links::police_search_link;
use crate::voice::{PipelineError, PoliceLocator};
use crate::{Location, PoliceStation};

/// Number of stations returned by [`MapsPoliceLocator::nearest`]
pub const NEAREST_STATIONS: usize = 3;

const DURATION_NOTE: &str = "Calculated via GPS";

/// Finds police stations around the user.
///
/// The single-station lookup opens a map search. Station lists come from an
/// optional directory of known stations; without one they are empty.
#[derive(Debug, Clone, Default)]
pub struct MapsPoliceLocator {
    directory: Vec<PoliceStation>,
}

impl MapsPoliceLocator {
    pub fn with_directory(directory: Vec<PoliceStation>) -> Self {
        Self { directory }
    }

    /// Load the directory from a JSON array of stations.
    ///
    /// A missing file yields an empty directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No police directory at {}", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read police directory {}", path.display()))?;
        let directory: Vec<PoliceStation> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse police directory {}", path.display()))?;
        Ok(Self::with_directory(directory))
    }

    /// Locator for an optional directory path; unreadable files are logged
    /// and treated as empty
    pub fn from_optional_file(path: Option<&Path>) -> Self {
        match path.map(Self::from_file) {
            Some(Ok(locator)) => locator,
            Some(Err(e)) => {
                warn!("{:#}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// The closest stations to `location`, nearest first
    pub fn nearest(&self, location: Location) -> Vec<PoliceStation> {
        let mut ranked: Vec<(f64, &PoliceStation)> = self
            .directory
            .iter()
            .map(|station| (location.distance_km(station.location()), station))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

        ranked
            .into_iter()
            .take(NEAREST_STATIONS)
            .map(|(km, station)| PoliceStation {
                distance: format!("{:.1} km", km),
                duration: DURATION_NOTE.to_string(),
                ..station.clone()
            })
            .collect()
    }
}

#[async_trait]
impl PoliceLocator for MapsPoliceLocator {
    async fn nearest_station(&self, location: Option<Location>) -> Result<String> {
        let location = location.ok_or(PipelineError::LocationUnavailable)?;
        Ok(police_search_link(location))
    }

    async fn stations(&self, location: Location) -> Vec<PoliceStation> {
        self.nearest(location)
    }
}
