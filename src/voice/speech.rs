//! Spoken feedback.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use super::services::SpeechSynthesizer;

/// Fire-and-forget speech with silent mode.
///
/// At most one utterance is audible: any prior one is cancelled before the
/// next is spoken. In silent mode nothing reaches the synthesizer.
#[derive(Clone)]
pub struct Speaker {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    silent: Arc<AtomicBool>,
}

impl Speaker {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, silent: bool) -> Self {
        Self {
            synthesizer,
            silent: Arc::new(AtomicBool::new(silent)),
        }
    }

    /// Speak `text`, replacing anything currently being spoken
    pub fn say(&self, text: &str) {
        if self.is_silent() {
            debug!("Silent mode, not speaking: {}", text);
            return;
        }
        self.synthesizer.cancel();
        self.synthesizer.speak(text);
    }

    pub fn is_silent(&self) -> bool {
        self.silent.load(Ordering::Relaxed)
    }

    /// Toggle silent mode; applies to every clone of this speaker
    pub fn set_silent(&self, silent: bool) {
        self.silent.store(silent, Ordering::Relaxed);
    }
}
