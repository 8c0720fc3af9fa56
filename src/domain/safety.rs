use serde::{Deserialize, Serialize};

/// Coarse safety classification of an area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyStatus {
    Safe,
    Caution,
    Danger,
}

impl std::fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyStatus::Safe => write!(f, "SAFE"),
            SafetyStatus::Caution => write!(f, "CAUTION"),
            SafetyStatus::Danger => write!(f, "DANGER"),
        }
    }
}

/// Result of a voice "check area" query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyAssessment {
    pub status: SafetyStatus,
    /// Short label with indicator, e.g. "SAFE 🟢"
    pub label: String,
    /// Sentence spoken back to the user
    pub message: String,
    /// 0-100, higher is safer
    pub score: u8,
    /// "High" or "Normal"
    pub priority: String,
    /// UI colour tag (emerald, amber, rose)
    pub color_tag: String,
    /// Haptic pattern in milliseconds
    pub vibration_pattern: Vec<u32>,
}

/// Detailed assessment shown on the safety map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub status: SafetyStatus,
    pub level: String,
    pub color: String,
    pub score: u8,
    pub lighting: u8,
    pub crowd: u8,
    pub crime_score: u8,
    pub time_factor: u32,
    pub suggestion: String,
    pub area: String,
}

/// A synthetic crowd sample around the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrowdPoint {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    /// Unix timestamp in milliseconds
    pub last_seen: i64,
}
