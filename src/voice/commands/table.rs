//! CommandTable - ordered phrase table and intent matching

use super::intent::{CommandPhrases, Intent};
use crate::voice::normalize::normalize;

/// Ordered phrase table. Declaration order is the tie-break.
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: Vec<CommandPhrases>,
}

/// Result of a phrase match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMatch {
    pub intent: Intent,
    /// The trigger phrase that matched
    pub phrase: String,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::for_wake_word("iris")
    }
}

impl CommandTable {
    /// The four-intent table with every phrase led by `wake_word`.
    ///
    /// The wake word is normalized first, so "Hey, Nova" yields phrases like
    /// "hey nova emergency".
    pub fn for_wake_word(wake_word: &str) -> Self {
        let wake = normalize(wake_word);
        let phrase = |command: &str| format!("{} {}", wake, command);

        Self::new(vec![
            CommandPhrases::new(Intent::Sos)
                .with_phrase(phrase("emergency"))
                .with_phrase(phrase("help"))
                .with_phrase(phrase("sos")),
            CommandPhrases::new(Intent::Area)
                .with_phrase(phrase("check area"))
                .with_phrase(phrase("area"))
                .with_phrase(phrase("scan area")),
            CommandPhrases::new(Intent::Location)
                .with_phrase(phrase("where am i"))
                .with_phrase(phrase("location"))
                .with_phrase(phrase("my location")),
            CommandPhrases::new(Intent::Stop)
                .with_phrase(phrase("stop"))
                .with_phrase(phrase("cancel")),
        ])
    }

    /// Build a table; `entries` order decides ties
    pub fn new(entries: Vec<CommandPhrases>) -> Self {
        Self { entries }
    }

    /// Entries in match order
    pub fn entries(&self) -> &[CommandPhrases] {
        &self.entries
    }

    /// Match normalized text, returning the winning intent and phrase
    pub fn find(&self, normalized: &str) -> Option<CommandMatch> {
        self.entries.iter().find_map(|entry| {
            entry.matches(normalized).map(|phrase| CommandMatch {
                intent: entry.intent,
                phrase: phrase.to_string(),
            })
        })
    }

    /// Resolve normalized text to exactly one intent
    pub fn match_intent(&self, normalized: &str) -> Intent {
        self.find(normalized)
            .map(|m| m.intent)
            .unwrap_or(Intent::Unknown)
    }

    /// All phrases registered for an intent
    pub fn phrases_for(&self, intent: Intent) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.intent == intent)
            .flat_map(|e| e.phrases.iter().map(String::as_str))
            .collect()
    }
}
