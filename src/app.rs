//! Wiring of the console assistant
//!
//! Builds the collaborator set from the config and the local store and
//! starts the session controller task.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::Location;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::messaging::{MapsPoliceLocator, MessagingBroadcaster};
use crate::safety::TimeOfDayIndex;
use crate::store::StoreHandle;
use crate::voice::console::{
    ConsoleFeed, ConsoleLinkOpener, ConsoleSynthesizer, LoggingHaptics, NoopRecorder,
    SharedLocation, console_capture,
};
use crate::voice::{
    ActionDispatcher, Collaborators, CommandTable, EmergencyState, SessionController, Speaker,
    VoiceHandle, channel,
};

/// Collaborators backed by the terminal and the local store
pub fn console_collaborators(
    config: &Config,
    store: StoreHandle,
    location: Arc<SharedLocation>,
    clock: Arc<dyn Clock>,
) -> Collaborators {
    let broadcaster =
        MessagingBroadcaster::new(config.sos.country_code.clone(), config.sos.fallback_location());

    Collaborators {
        speaker: Speaker::new(Arc::new(ConsoleSynthesizer), config.voice.silent_mode),
        broadcaster: Arc::new(broadcaster),
        police: Arc::new(MapsPoliceLocator::from_optional_file(
            config.sos.police_directory.as_deref(),
        )),
        safety: Arc::new(TimeOfDayIndex::new(clock.clone())),
        haptics: Arc::new(LoggingHaptics),
        links: Arc::new(ConsoleLinkOpener),
        location,
        contacts: Arc::new(store.clone()),
        history: Arc::new(store),
        recorder: Arc::new(NoopRecorder),
        clock,
    }
}

/// Dispatcher for one-off actions outside a voice session
pub fn console_dispatcher(
    config: &Config,
    store: StoreHandle,
    fix: Option<Location>,
) -> ActionDispatcher {
    let services = console_collaborators(
        config,
        store,
        Arc::new(SharedLocation::new(fix)),
        Arc::new(SystemClock),
    );
    ActionDispatcher::new(
        services,
        Arc::new(EmergencyState::new()),
        &config.voice,
        &config.sos,
    )
}

/// A running console voice pipeline
pub struct ConsolePipeline {
    pub handle: VoiceHandle,
    pub feed: ConsoleFeed,
    pub emergency: Arc<EmergencyState>,
    pub location: Arc<SharedLocation>,
    pub task: JoinHandle<()>,
}

/// Start the session controller with console capture
pub fn spawn_console_pipeline(
    config: &Config,
    store: StoreHandle,
    fix: Option<Location>,
) -> ConsolePipeline {
    let location = Arc::new(SharedLocation::new(fix));
    let emergency = Arc::new(EmergencyState::new());
    let services = console_collaborators(config, store, location.clone(), Arc::new(SystemClock));
    let dispatcher = ActionDispatcher::new(services, emergency.clone(), &config.voice, &config.sos);

    let (handle, inbox) = channel();
    let (capture, feed) = console_capture(handle.capture_sink());
    let controller = SessionController::new(
        inbox,
        Box::new(capture),
        dispatcher,
        CommandTable::for_wake_word(&config.voice.wake_word),
        config.voice.clone(),
    );
    let task = tokio::spawn(controller.run());

    ConsolePipeline {
        handle,
        feed,
        emergency,
        location,
        task,
    }
}
