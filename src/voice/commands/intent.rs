//! Intent tags and their trigger phrases

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Trigger an emergency broadcast
    Sos,
    /// Report the safety index for the current area
    Area,
    /// Show the current location
    Location,
    /// Dismiss the emergency and stop listening
    Stop,
    /// Nothing matched
    Unknown,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Sos => write!(f, "SOS"),
            Intent::Area => write!(f, "AREA"),
            Intent::Location => write!(f, "LOCATION"),
            Intent::Stop => write!(f, "STOP"),
            Intent::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// The trigger phrases for one intent
#[derive(Debug, Clone)]
pub struct CommandPhrases {
    pub intent: Intent,
    /// Lowercase, punctuation-free phrases
    pub phrases: Vec<String>,
}

impl CommandPhrases {
    /// Create an entry with no phrases
    pub fn new(intent: Intent) -> Self {
        Self {
            intent,
            phrases: Vec::new(),
        }
    }

    /// Add a trigger phrase
    pub fn with_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.phrases.push(phrase.into());
        self
    }

    /// First phrase that occurs as a substring of `normalized`
    pub fn matches(&self, normalized: &str) -> Option<&str> {
        self.phrases
            .iter()
            .map(String::as_str)
            .find(|phrase| normalized.contains(phrase))
    }
}
