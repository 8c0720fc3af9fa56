//! Terminal-backed collaborators.
//!
//! Typed lines stand in for recognized speech, spoken feedback is printed,
//! and links are printed instead of launched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::{debug, info};

use super::services::{
    AudioRecorder, CaptureService, Haptics, LinkOpener, LocationProvider, SpeechSynthesizer,
};
use super::session::CaptureSink;
use super::types::{CaptureError, CaptureEvent};
use crate::Location;

/// Build a console capture service and the feed that pushes lines into it
pub fn console_capture(sink: CaptureSink) -> (ConsoleCapture, ConsoleFeed) {
    let listening = Arc::new(AtomicBool::new(false));
    let capture = ConsoleCapture {
        listening: listening.clone(),
        sink: sink.clone(),
    };
    let feed = ConsoleFeed { listening, sink };
    (capture, feed)
}

/// Capture service whose "microphone" is stdin
pub struct ConsoleCapture {
    listening: Arc<AtomicBool>,
    sink: CaptureSink,
}

impl CaptureService for ConsoleCapture {
    fn start(&mut self, continuous: bool) -> Result<(), CaptureError> {
        if self.listening.swap(true, Ordering::SeqCst) {
            return Err(CaptureError::AlreadyRunning);
        }
        debug!(continuous, "Console capture started");
        self.sink.emit(CaptureEvent::Started);
        Ok(())
    }

    fn stop(&mut self) {
        if self.listening.swap(false, Ordering::SeqCst) {
            debug!("Console capture stopped");
            self.sink.emit(CaptureEvent::Ended);
        }
    }
}

/// Delivers typed lines as final transcripts while capture is running
#[derive(Clone)]
pub struct ConsoleFeed {
    listening: Arc<AtomicBool>,
    sink: CaptureSink,
}

impl ConsoleFeed {
    /// Returns false if the line was dropped because capture is off
    pub fn feed(&self, line: &str) -> bool {
        if !self.is_listening() {
            return false;
        }
        self.sink.emit(CaptureEvent::Result {
            transcript: line.to_string(),
            is_final: true,
        });
        true
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }
}

/// Prints what IRIS would say
#[derive(Debug, Default)]
pub struct ConsoleSynthesizer;

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn speak(&self, text: &str) {
        println!("🔊 IRIS: {}", text);
    }

    fn cancel(&self) {}
}

/// No vibration motor on a terminal
#[derive(Debug, Default)]
pub struct LoggingHaptics;

impl Haptics for LoggingHaptics {
    fn vibrate(&self, pattern: &[u32]) {
        debug!(?pattern, "Vibrate");
    }
}

/// Prints links for the user to open
#[derive(Debug, Default)]
pub struct ConsoleLinkOpener;

impl LinkOpener for ConsoleLinkOpener {
    fn open(&self, url: &str) {
        info!("Opening {}", url);
        println!("🔗 {}", url);
    }
}

/// A terminal has no microphone to record from
#[derive(Debug, Default)]
pub struct NoopRecorder;

impl AudioRecorder for NoopRecorder {
    fn record(&self, duration: Duration) -> Option<String> {
        debug!(secs = duration.as_secs(), "Audio recording unavailable");
        None
    }
}

/// Location fix that can be updated while the pipeline runs
#[derive(Debug, Default)]
pub struct SharedLocation {
    fix: RwLock<Option<Location>>,
}

impl SharedLocation {
    pub fn new(fix: Option<Location>) -> Self {
        Self {
            fix: RwLock::new(fix),
        }
    }

    pub fn set(&self, fix: Option<Location>) {
        let mut guard = self.fix.write().unwrap_or_else(|e| e.into_inner());
        *guard = fix;
    }
}

impl LocationProvider for SharedLocation {
    fn current(&self) -> Option<Location> {
        *self.fix.read().unwrap_or_else(|e| e.into_inner())
    }
}
