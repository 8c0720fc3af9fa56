//! Collaborator interfaces consumed by the voice pipeline.
//!
//! Every collaborator is expected to degrade to a documented default rather
//! than fail loudly; the dispatcher still treats errors returned from the
//! async ones as recoverable.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use super::types::CaptureError;
use crate::{Contact, Location, PoliceStation, SosCategory, SosDispatchResult, SosLog};

/// Speech capture (microphone + recognizer).
///
/// Events (`Started`, `Result`, `Error`, `Ended`) are delivered through the
/// [`CaptureSink`](super::CaptureSink) the service was created with.
pub trait CaptureService: Send {
    /// Start capturing; `continuous` asks the recognizer to keep the stream open
    fn start(&mut self, continuous: bool) -> Result<(), CaptureError>;

    /// Stop capturing and release the device
    fn stop(&mut self);
}

/// Text-to-speech output
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `text` without waiting for playback to finish
    fn speak(&self, text: &str);

    /// Cut off whatever is currently being spoken
    fn cancel(&self);
}

/// Sends the SOS to trusted contacts
#[async_trait]
pub trait SosBroadcaster: Send + Sync {
    /// Broadcast an SOS. A missing location must be replaced by the fallback
    /// coordinate, and every contact must be attempted.
    async fn dispatch(
        &self,
        location: Option<Location>,
        contacts: &[Contact],
        category: SosCategory,
    ) -> Result<SosDispatchResult>;
}

/// Finds the nearest police station
#[async_trait]
pub trait PoliceLocator: Send + Sync {
    /// Link to open for the nearest police station
    async fn nearest_station(&self, location: Option<Location>) -> Result<String>;

    /// Known stations around `location`, nearest first. Empty when unknown.
    async fn stations(&self, _location: Location) -> Vec<PoliceStation> {
        Vec::new()
    }
}

/// Vibration motor; implementations without one do nothing
pub trait Haptics: Send + Sync {
    /// Vibrate with a pattern of on/off durations in milliseconds
    fn vibrate(&self, pattern: &[u32]);
}

/// Opens external links (maps, messaging)
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str);
}

/// Latest known device location
pub trait LocationProvider: Send + Sync {
    fn current(&self) -> Option<Location>;
}

/// Trusted contacts to alert
pub trait ContactSource: Send + Sync {
    fn contacts(&self) -> Vec<Contact>;
}

/// Where successful broadcasts are recorded
pub trait SosHistory: Send + Sync {
    fn record(&self, log: SosLog);
}

/// Background audio evidence captured after an SOS
pub trait AudioRecorder: Send + Sync {
    /// Start recording for `duration` without blocking.
    /// Returns an id for the recording, or `None` if no microphone is usable.
    fn record(&self, duration: Duration) -> Option<String>;
}
