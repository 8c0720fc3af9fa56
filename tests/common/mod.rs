//! Shared test utilities: recording fakes for every voice pipeline collaborator

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use iris::clock::FixedClock;
use iris::config::{SosSettings, VoiceSettings};
use iris::messaging::police_search_link;
use iris::safety::TimeOfDayIndex;
use iris::voice::console::SharedLocation;
use iris::voice::{
    ActionDispatcher, AudioRecorder, CaptureError, CaptureErrorKind, CaptureEvent, CaptureService,
    Collaborators, CommandTable, ControllerMessage, EmergencyState, Haptics, LinkOpener,
    ListenMode, PoliceLocator, SessionController, SosBroadcaster, SosHistory, Speaker,
    SpeechSynthesizer, VoiceCommand, VoiceHandle, channel,
};
use iris::{Contact, Location, NotificationLink, SosCategory, SosDispatchResult, SosLog};

/// A fix in New Delhi
pub const DELHI: Location = Location {
    lat: 28.6139,
    lng: 77.209,
};

/// What the fake capture device was asked to do
#[derive(Default)]
pub struct CaptureDevice {
    pub starts: AtomicUsize,
    pub stops: AtomicUsize,
    pub running: AtomicBool,
    pub fail_start: AtomicBool,
}

impl CaptureDevice {
    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

pub struct FakeCapture(pub Arc<CaptureDevice>);

impl CaptureService for FakeCapture {
    fn start(&mut self, _continuous: bool) -> Result<(), CaptureError> {
        if self.0.fail_start.load(Ordering::SeqCst) {
            return Err(CaptureError::Unavailable("microphone permission denied".to_string()));
        }
        if self.0.running.swap(true, Ordering::SeqCst) {
            return Err(CaptureError::AlreadyRunning);
        }
        self.0.starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&mut self) {
        if self.0.running.swap(false, Ordering::SeqCst) {
            self.0.stops.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[derive(Default)]
pub struct RecordingSynth {
    pub spoken: Mutex<Vec<String>>,
}

impl RecordingSynth {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl SpeechSynthesizer for RecordingSynth {
    fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }

    fn cancel(&self) {}
}

#[derive(Default)]
pub struct RecordingHaptics {
    pub patterns: Mutex<Vec<Vec<u32>>>,
}

impl RecordingHaptics {
    pub fn patterns(&self) -> Vec<Vec<u32>> {
        self.patterns.lock().unwrap().clone()
    }
}

impl Haptics for RecordingHaptics {
    fn vibrate(&self, pattern: &[u32]) {
        self.patterns.lock().unwrap().push(pattern.to_vec());
    }
}

#[derive(Default)]
pub struct RecordingLinks {
    pub opened: Mutex<Vec<String>>,
}

impl RecordingLinks {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl LinkOpener for RecordingLinks {
    fn open(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

/// One call made to the broadcaster
#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastCall {
    pub location: Option<Location>,
    pub contacts: Vec<String>,
    pub category: SosCategory,
}

#[derive(Default)]
pub struct FakeBroadcaster {
    pub calls: Mutex<Vec<BroadcastCall>>,
    pub fail: AtomicBool,
    pub delay: Duration,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeBroadcaster {
    pub fn calls(&self) -> Vec<BroadcastCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SosBroadcaster for FakeBroadcaster {
    async fn dispatch(
        &self,
        location: Option<Location>,
        contacts: &[Contact],
        category: SosCategory,
    ) -> Result<SosDispatchResult> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        self.calls.lock().unwrap().push(BroadcastCall {
            location,
            contacts: contacts.iter().map(|c| c.name.clone()).collect(),
            category,
        });

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("gateway unreachable"));
        }

        Ok(SosDispatchResult {
            success: true,
            dispatched_count: contacts.len(),
            notification_links: contacts
                .iter()
                .map(|c| NotificationLink {
                    contact_name: c.name.clone(),
                    link: format!("https://wa.me/91{}", c.phone),
                })
                .collect(),
        })
    }
}

#[derive(Default)]
pub struct FakePolice {
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
}

#[async_trait]
impl PoliceLocator for FakePolice {
    async fn nearest_station(&self, location: Option<Location>) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("places lookup timed out"));
        }
        let location = location.ok_or_else(|| anyhow!("no fix"))?;
        Ok(police_search_link(location))
    }
}

pub struct FixedContacts(pub Vec<Contact>);

impl iris::voice::ContactSource for FixedContacts {
    fn contacts(&self) -> Vec<Contact> {
        self.0.clone()
    }
}

#[derive(Default)]
pub struct RecordingHistory {
    pub logs: Mutex<Vec<SosLog>>,
}

impl RecordingHistory {
    pub fn logs(&self) -> Vec<SosLog> {
        self.logs.lock().unwrap().clone()
    }
}

impl SosHistory for RecordingHistory {
    fn record(&self, log: SosLog) {
        self.logs.lock().unwrap().push(log);
    }
}

/// Hands out sequential recording ids
#[derive(Default)]
pub struct RecordingRecorder {
    pub durations: Mutex<Vec<Duration>>,
}

impl RecordingRecorder {
    pub fn durations(&self) -> Vec<Duration> {
        self.durations.lock().unwrap().clone()
    }
}

impl AudioRecorder for RecordingRecorder {
    fn record(&self, duration: Duration) -> Option<String> {
        let mut durations = self.durations.lock().unwrap();
        durations.push(duration);
        Some(format!("rec-{}", durations.len()))
    }
}

/// Handles on every fake wired into a pipeline
#[derive(Clone)]
pub struct Fakes {
    pub capture: Arc<CaptureDevice>,
    pub synth: Arc<RecordingSynth>,
    pub haptics: Arc<RecordingHaptics>,
    pub links: Arc<RecordingLinks>,
    pub broadcaster: Arc<FakeBroadcaster>,
    pub police: Arc<FakePolice>,
    pub history: Arc<RecordingHistory>,
    pub recorder: Arc<RecordingRecorder>,
    pub location: Arc<SharedLocation>,
    pub emergency: Arc<EmergencyState>,
}

impl Fakes {
    /// True if nothing observable happened besides capture control
    pub fn no_side_effects(&self) -> bool {
        self.synth.spoken().is_empty()
            && self.haptics.patterns().is_empty()
            && self.links.opened().is_empty()
            && self.broadcaster.calls().is_empty()
            && self.police.calls.load(Ordering::SeqCst) == 0
            && self.history.logs().is_empty()
            && self.recorder.durations().is_empty()
            && !self.emergency.is_active()
    }
}

pub struct Builder {
    pub settings: VoiceSettings,
    pub hour: u32,
    pub location: Option<Location>,
    pub contacts: Vec<Contact>,
    pub broadcast_delay: Duration,
    pub broadcast_fails: bool,
    pub police_fails: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            settings: VoiceSettings::default(),
            hour: 10,
            location: Some(DELHI),
            contacts: Contact::defaults(),
            broadcast_delay: Duration::ZERO,
            broadcast_fails: false,
            police_fails: false,
        }
    }
}

impl Builder {
    pub fn hour(mut self, hour: u32) -> Self {
        self.hour = hour;
        self
    }

    pub fn no_location(mut self) -> Self {
        self.location = None;
        self
    }

    pub fn wake_word(mut self, wake_word: &str) -> Self {
        self.settings.wake_word = wake_word.to_string();
        self
    }

    pub fn interim_min_chars(mut self, chars: usize) -> Self {
        self.settings.interim_min_chars = chars;
        self
    }

    pub fn silent(mut self) -> Self {
        self.settings.silent_mode = true;
        self
    }

    pub fn broadcast_delay(mut self, delay: Duration) -> Self {
        self.broadcast_delay = delay;
        self
    }

    pub fn broadcast_fails(mut self) -> Self {
        self.broadcast_fails = true;
        self
    }

    pub fn police_fails(mut self) -> Self {
        self.police_fails = true;
        self
    }

    pub fn dispatcher(self) -> (ActionDispatcher, Fakes) {
        let fakes = Fakes {
            capture: Arc::new(CaptureDevice::default()),
            synth: Arc::new(RecordingSynth::default()),
            haptics: Arc::new(RecordingHaptics::default()),
            links: Arc::new(RecordingLinks::default()),
            broadcaster: Arc::new(FakeBroadcaster {
                delay: self.broadcast_delay,
                fail: AtomicBool::new(self.broadcast_fails),
                ..Default::default()
            }),
            police: Arc::new(FakePolice {
                fail: AtomicBool::new(self.police_fails),
                ..Default::default()
            }),
            history: Arc::new(RecordingHistory::default()),
            recorder: Arc::new(RecordingRecorder::default()),
            location: Arc::new(SharedLocation::new(self.location)),
            emergency: Arc::new(EmergencyState::new()),
        };

        let clock = Arc::new(FixedClock::at_hour(self.hour));
        let services = Collaborators {
            speaker: Speaker::new(fakes.synth.clone(), self.settings.silent_mode),
            broadcaster: fakes.broadcaster.clone(),
            police: fakes.police.clone(),
            safety: Arc::new(TimeOfDayIndex::new(clock.clone())),
            haptics: fakes.haptics.clone(),
            links: fakes.links.clone(),
            location: fakes.location.clone(),
            contacts: Arc::new(FixedContacts(self.contacts)),
            history: fakes.history.clone(),
            recorder: fakes.recorder.clone(),
            clock,
        };

        let dispatcher = ActionDispatcher::new(
            services,
            fakes.emergency.clone(),
            &self.settings,
            &SosSettings::default(),
        );
        (dispatcher, fakes)
    }

    pub fn build(self) -> Harness {
        let settings = self.settings.clone();
        let (dispatcher, fakes) = self.dispatcher();
        let (handle, inbox) = channel();
        let controller = SessionController::new(
            inbox,
            Box::new(FakeCapture(fakes.capture.clone())),
            dispatcher,
            CommandTable::for_wake_word(&settings.wake_word),
            settings.clone(),
        );

        Harness {
            controller,
            handle,
            fakes,
            settings,
        }
    }
}

pub fn builder() -> Builder {
    Builder::default()
}

/// Controller driven one message at a time
pub struct Harness {
    pub controller: SessionController,
    pub handle: VoiceHandle,
    pub fakes: Fakes,
    pub settings: VoiceSettings,
}

impl Harness {
    pub async fn enable(&mut self, mode: ListenMode) {
        self.controller
            .handle(ControllerMessage::Command(VoiceCommand::Enable(mode)))
            .await;
    }

    pub async fn dismiss(&mut self) {
        self.controller
            .handle(ControllerMessage::Command(VoiceCommand::DismissEmergency))
            .await;
    }

    /// Deliver a final transcript
    pub async fn say(&mut self, text: &str) {
        self.capture(CaptureEvent::Result {
            transcript: text.to_string(),
            is_final: true,
        })
        .await;
    }

    /// Deliver an interim transcript
    pub async fn say_interim(&mut self, text: &str) {
        self.capture(CaptureEvent::Result {
            transcript: text.to_string(),
            is_final: false,
        })
        .await;
    }

    pub async fn error(&mut self, code: &str) {
        self.capture(CaptureEvent::Error(CaptureErrorKind::from_code(code)))
            .await;
    }

    pub async fn capture(&mut self, event: CaptureEvent) {
        self.controller.handle(ControllerMessage::Capture(event)).await;
    }

    /// Process the next queued message (restart timers, handle commands)
    pub async fn step(&mut self) -> bool {
        self.controller.step().await
    }

    /// Simulate the device stopping after `stop()` was requested
    pub async fn ended(&mut self) {
        self.capture(CaptureEvent::Ended).await;
    }
}
