//! Synthetic crowd density for the safety map

use rand::Rng;

use super::index::iris_index;
use crate::clock::Clock;
use crate::{CrowdPoint, Location, RiskAnalysis, SafetyStatus};

/// Number of simulated people around the user
pub const CROWD_SIZE: usize = 150;

/// Half-width (degrees) of the box counted as "nearby"
const NEARBY_RADIUS: f64 = 0.0015;

/// Generate crowd points scattered around `center`.
///
/// About one in five points is clustered tightly (spread 0.005°), the rest
/// are spread over 0.03°. Pass a seeded RNG for reproducible output.
pub fn generate_crowd<R: Rng>(center: Location, now_ms: i64, rng: &mut R) -> Vec<CrowdPoint> {
    (0..CROWD_SIZE)
        .map(|i| {
            let clustered = rng.gen_bool(0.2);
            let spread = if clustered { 0.005 } else { 0.03 };
            let offset_lat = (rng.gen_range(0.0..1.0) - 0.5) * spread;
            let offset_lng = (rng.gen_range(0.0..1.0) - 0.5) * spread;
            CrowdPoint {
                id: format!("u_{}", i),
                lat: center.lat + offset_lat,
                lng: center.lng + offset_lng,
                last_seen: now_ms,
            }
        })
        .collect()
}

/// Count crowd points inside the nearby box around `location`
pub fn nearby_count(location: Location, crowd: &[CrowdPoint]) -> usize {
    crowd
        .iter()
        .filter(|p| {
            (p.lat - location.lat).abs() < NEARBY_RADIUS
                && (p.lng - location.lng).abs() < NEARBY_RADIUS
        })
        .count()
}

/// Combine the hourly index with crowd density into a map-view analysis
pub fn calculate_risk(location: Location, crowd: &[CrowdPoint], hour: u32) -> RiskAnalysis {
    let index = iris_index(hour);
    let nearby = nearby_count(location, crowd);

    let dark = hour < 6 || hour > 19;
    let danger = index.status == SafetyStatus::Danger;

    RiskAnalysis {
        status: index.status,
        level: index.label.to_string(),
        color: index.color.to_string(),
        score: match index.status {
            SafetyStatus::Safe => 95,
            SafetyStatus::Caution => 65,
            SafetyStatus::Danger => 30,
        },
        lighting: if dark { 30 } else { 90 },
        crowd: (nearby * 10).min(100) as u8,
        crime_score: if danger { 80 } else { 20 },
        time_factor: hour,
        suggestion: if danger {
            "Avoid unlit paths."
        } else {
            "Area parameters stable."
        }
        .to_string(),
        area: "Active Operational Grid".to_string(),
    }
}

/// Scan the crowd around `location` at the clock's current time
pub fn assess_area<R: Rng>(location: Location, clock: &dyn Clock, rng: &mut R) -> RiskAnalysis {
    let crowd = generate_crowd(location, clock.now().timestamp_millis(), rng);
    calculate_risk(location, &crowd, clock.local_hour())
}
