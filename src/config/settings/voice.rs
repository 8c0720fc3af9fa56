//! Voice assistant settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Voice assistant settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Keep listening after each command (false = single-shot)
    #[serde(default = "default_continuous")]
    pub continuous: bool,

    /// Pause before capture restarts after a command, so the assistant
    /// does not hear its own spoken reply
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Interim (non-final) transcripts longer than this many characters
    /// are processed immediately instead of waiting for the final result
    #[serde(default = "default_interim_min_chars")]
    pub interim_min_chars: usize,

    /// Unrecognised utterances longer than this get a spoken help message
    #[serde(default = "default_unknown_min_chars")]
    pub unknown_min_chars: usize,

    /// Token that must appear in an utterance before it is interpreted
    #[serde(default = "default_wake_word")]
    pub wake_word: String,

    /// Recognizer locale
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Suppress all spoken feedback
    #[serde(default)]
    pub silent_mode: bool,
}

fn default_continuous() -> bool {
    true
}

fn default_settle_delay_ms() -> u64 {
    1200
}

fn default_interim_min_chars() -> usize {
    4
}

fn default_unknown_min_chars() -> usize {
    5
}

fn default_wake_word() -> String {
    "iris".to_string()
}

fn default_locale() -> String {
    "en-IN".to_string()
}

impl VoiceSettings {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            continuous: default_continuous(),
            settle_delay_ms: default_settle_delay_ms(),
            interim_min_chars: default_interim_min_chars(),
            unknown_min_chars: default_unknown_min_chars(),
            wake_word: default_wake_word(),
            locale: default_locale(),
            silent_mode: false,
        }
    }
}
