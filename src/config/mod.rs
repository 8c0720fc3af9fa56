//! Configuration loading and management

mod default;
mod io;
mod settings;

pub use default::DEFAULT_CONFIG;
pub(crate) use io::write_locked;
pub use settings::{SosSettings, VoiceSettings};

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Voice assistant settings
    #[serde(default)]
    pub voice: VoiceSettings,

    /// SOS broadcast settings
    #[serde(default)]
    pub sos: SosSettings,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, or from ~/.iris/config.toml if it exists.
    /// Falls back to defaults when no file is present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let global_path = Self::global_config_path();
        if global_path.exists() {
            return Self::from_file(&global_path);
        }

        tracing::debug!("No config file at {}, using defaults", global_path.display());
        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        if self.voice.wake_word.trim().is_empty() {
            anyhow::bail!("voice.wake_word must not be empty");
        }
        if !(-90.0..=90.0).contains(&self.sos.fallback_lat)
            || !(-180.0..=180.0).contains(&self.sos.fallback_lng)
        {
            anyhow::bail!(
                "sos fallback coordinate out of range: {}, {}",
                self.sos.fallback_lat,
                self.sos.fallback_lng
            );
        }
        if self.sos.country_code.is_empty()
            || !self.sos.country_code.chars().all(|c| c.is_ascii_digit())
        {
            anyhow::bail!("sos.country_code must be digits only");
        }
        Ok(())
    }
}
