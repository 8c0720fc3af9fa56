//! Action dispatcher - performs the side effects of a resolved intent.
//!
//! Nothing here returns an error. Failures are logged, reported in the
//! [`DispatchOutcome`], and turned into either silence or a spoken message.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::commands::Intent;
use super::emergency::EmergencyState;
use super::normalize::normalize;
use super::services::{
    AudioRecorder, ContactSource, Haptics, LinkOpener, LocationProvider, PoliceLocator,
    SosBroadcaster, SosHistory,
};
use super::speech::Speaker;
use super::types::PipelineError;
use crate::clock::Clock;
use crate::config::{SosSettings, VoiceSettings};
use crate::messaging::maps_link;
use crate::safety::{SafetyIndex, is_night};
use crate::{SosCategory, SosLog};

/// Vibration played when an SOS starts
const SOS_VIBRATION: [u32; 3] = [500, 200, 500];

/// Short pulse acknowledging a stop
const STOP_VIBRATION: [u32; 1] = [200];

const SOS_CONFIRMATION: &str = "Emergency detected. SOS sent to your trusted contacts.";
const NIGHT_WARNING: &str = " Night time detected. Stay alert.";
const AREA_NO_LOCATION: &str = "GPS not available.";
const LOCATION_CONFIRMATION: &str = "This is your current location. I have opened it on map.";
const LOCATION_NOT_READY: &str = "Location not ready. Please wait.";
const STOP_ACK: &str = "Command received. SOS protocol dismissed. I am standing by.";

/// Audio captured after an SOS is raised
const SOS_RECORDING: Duration = Duration::from_secs(15);

/// Everything the dispatcher talks to
#[derive(Clone)]
pub struct Collaborators {
    pub speaker: Speaker,
    pub broadcaster: Arc<dyn SosBroadcaster>,
    pub police: Arc<dyn PoliceLocator>,
    pub safety: Arc<dyn SafetyIndex>,
    pub haptics: Arc<dyn Haptics>,
    pub links: Arc<dyn LinkOpener>,
    pub location: Arc<dyn LocationProvider>,
    pub contacts: Arc<dyn ContactSource>,
    pub history: Arc<dyn SosHistory>,
    pub recorder: Arc<dyn AudioRecorder>,
    pub clock: Arc<dyn Clock>,
}

/// What a dispatch did
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub intent: Intent,
    /// Status line for the assistant panel
    pub display: String,
    /// Set when the action could not complete
    pub error: Option<PipelineError>,
}

impl DispatchOutcome {
    fn ok(intent: Intent, display: impl Into<String>) -> Self {
        Self {
            intent,
            display: display.into(),
            error: None,
        }
    }

    fn failed(intent: Intent, display: impl Into<String>, error: PipelineError) -> Self {
        Self {
            intent,
            display: display.into(),
            error: Some(error),
        }
    }
}

/// Performs exactly one action per resolved intent
pub struct ActionDispatcher {
    services: Collaborators,
    emergency: Arc<EmergencyState>,
    unknown_min_chars: usize,
    help_message: String,
    fallback: crate::Location,
}

impl ActionDispatcher {
    pub fn new(
        services: Collaborators,
        emergency: Arc<EmergencyState>,
        voice: &VoiceSettings,
        sos: &SosSettings,
    ) -> Self {
        Self {
            services,
            emergency,
            unknown_min_chars: voice.unknown_min_chars,
            help_message: help_message(&voice.wake_word),
            fallback: sos.fallback_location(),
        }
    }

    /// Shared emergency overlay state
    pub fn emergency(&self) -> &Arc<EmergencyState> {
        &self.emergency
    }

    pub fn speaker(&self) -> &Speaker {
        &self.services.speaker
    }

    /// Run the action for `intent`. `normalized` is the transcript it came from.
    pub async fn dispatch(&self, intent: Intent, normalized: &str) -> DispatchOutcome {
        let outcome = match intent {
            Intent::Sos => self.trigger_sos(SosCategory::Family).await,
            Intent::Area => self.check_area(),
            Intent::Location => self.show_location(),
            Intent::Stop => self.stop_emergency(),
            Intent::Unknown => self.unrecognized(normalized),
        };

        match &outcome.error {
            Some(err) => warn!(intent = %intent, "{}", err),
            None => debug!(intent = %intent, "Action complete"),
        }
        outcome
    }

    /// Raise the emergency, broadcast to all contacts and open the nearest
    /// police station. Both network-bound calls run concurrently.
    pub async fn trigger_sos(&self, category: SosCategory) -> DispatchOutcome {
        let s = &self.services;

        self.emergency.raise();
        s.haptics.vibrate(&SOS_VIBRATION);

        let location = s.location.current();
        let contacts = s.contacts.contacts();
        if contacts.is_empty() {
            warn!("SOS triggered with no trusted contacts configured");
        }

        info!(category = %category, contacts = contacts.len(), "IRIS alert: emergency detected");

        let (broadcast, station) = futures::join!(
            s.broadcaster.dispatch(location, &contacts, category),
            s.police.nearest_station(location),
        );

        match station {
            Ok(url) => s.links.open(&url),
            Err(e) => warn!("Police station lookup failed: {:#}", e),
        }

        let failure = match broadcast {
            Ok(result) if result.success => {
                self.emergency.confirm(result.notification_links);
                let audio_recording_id = s.recorder.record(SOS_RECORDING);
                s.history.record(SosLog {
                    timestamp: s.clock.now(),
                    category,
                    location: location.unwrap_or(self.fallback),
                    contacts_notified: contacts.iter().map(|c| c.name.clone()).collect(),
                    audio_recording_id,
                });
                s.speaker.say(SOS_CONFIRMATION);
                info!(dispatched = result.dispatched_count, "SOS broadcast confirmed");
                return DispatchOutcome::ok(Intent::Sos, "IRIS ALERT: Emergency detected");
            }
            Ok(_) => "broadcaster reported failure".to_string(),
            Err(e) => format!("{:#}", e),
        };

        // Overlay stays up, unconfirmed, so the user can retry by hand
        DispatchOutcome::failed(
            Intent::Sos,
            "IRIS ALERT: Emergency detected (not delivered)",
            PipelineError::DispatchFailure(failure),
        )
    }

    /// Speak the safety index for the current location
    pub fn check_area(&self) -> DispatchOutcome {
        let s = &self.services;

        let Some(location) = s.location.current() else {
            s.speaker.say(AREA_NO_LOCATION);
            return DispatchOutcome::failed(
                Intent::Area,
                "IRIS: GPS not available",
                PipelineError::LocationUnavailable,
            );
        };

        let assessment = s.safety.assess(location);
        let night = if is_night(s.clock.local_hour()) {
            NIGHT_WARNING
        } else {
            ""
        };

        s.speaker.say(&format!("{}{}", assessment.message, night));

        DispatchOutcome::ok(
            Intent::Area,
            format!(
                "IRIS SAFETY INDEX: {}\n{}{}",
                assessment.label, assessment.message, night
            ),
        )
    }

    /// Open the current location on a map
    pub fn show_location(&self) -> DispatchOutcome {
        let s = &self.services;

        let Some(location) = s.location.current() else {
            s.speaker.say(LOCATION_NOT_READY);
            return DispatchOutcome::failed(
                Intent::Location,
                "IRIS: Location not ready",
                PipelineError::LocationUnavailable,
            );
        };

        s.links.open(&maps_link(location));
        s.speaker.say(LOCATION_CONFIRMATION);

        DispatchOutcome::ok(
            Intent::Location,
            format!("IRIS LOCATION:\n{}", location.display_short()),
        )
    }

    /// Dismiss the emergency overlay
    pub fn stop_emergency(&self) -> DispatchOutcome {
        let s = &self.services;

        self.emergency.dismiss();
        s.speaker.say(STOP_ACK);
        s.haptics.vibrate(&STOP_VIBRATION);

        DispatchOutcome::ok(Intent::Stop, "IRIS: STANDBY")
    }

    /// Offer help for longer unmatched utterances; stay quiet on short noise
    fn unrecognized(&self, normalized: &str) -> DispatchOutcome {
        if normalized.chars().count() > self.unknown_min_chars {
            self.services.speaker.say(&self.help_message);
        }
        DispatchOutcome::ok(
            Intent::Unknown,
            format!("IRIS: LISTENING... (\"{}\")", normalized),
        )
    }
}

/// Spoken help listing the primary commands under `wake_word`
fn help_message(wake_word: &str) -> String {
    let wake = normalize(wake_word)
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "I did not understand. Say: {w} Emergency, {w} Check Area, or {w} Where Am I.",
        w = wake
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
