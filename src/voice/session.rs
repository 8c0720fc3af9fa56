//! Recognition session controller.
//!
//! A single task owns the session and consumes one ordered stream of
//! [`ControllerMessage`]s: capture events, user commands and restart timers.
//! Transcripts are therefore never interpreted concurrently.
//!
//! ```text
//! Idle --Enable--> Listening --transcript--> Processing --+--> Listening (continuous, after delay)
//!   ^                  |                                  +--> Suppressed (SOS) --Dismiss--> Idle
//!   |                  +--fatal error--> Suspended         +--> Idle (STOP or single-shot)
//!   +------------------------- Disable (from any state) -----------------------------+
//! ```
//!
//! Cancellation: [`VoiceHandle::disable`] bumps a shared generation counter
//! before its message is even queued. Restart timers and in-flight dispatches
//! compare against it, so a disabled session never restarts itself.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use super::commands::{CommandTable, Intent};
use super::dispatch::{ActionDispatcher, DispatchOutcome};
use super::emergency::EmergencyState;
use super::normalize::{has_wake_word, normalize};
use super::services::CaptureService;
use super::types::{
    CaptureErrorKind, CaptureEvent, ControllerMessage, ListenMode, PipelineError, SessionState,
    VoiceCommand,
};
use crate::config::VoiceSettings;

/// Create the controller channel.
///
/// The handle goes to the UI (and, via [`VoiceHandle::capture_sink`], to the
/// capture service); the inbox goes to [`SessionController::new`].
pub fn channel() -> (VoiceHandle, ControllerInbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    let generation = Arc::new(AtomicU64::new(0));
    let (state_tx, state_rx) = watch::channel(SessionState::Idle);

    let handle = VoiceHandle {
        tx: tx.clone(),
        generation: generation.clone(),
        state_rx,
    };
    let inbox = ControllerInbox {
        tx: tx.downgrade(),
        rx,
        generation,
        state_tx,
    };
    (handle, inbox)
}

/// Receiving side of the controller channel
pub struct ControllerInbox {
    tx: mpsc::WeakUnboundedSender<ControllerMessage>,
    rx: mpsc::UnboundedReceiver<ControllerMessage>,
    generation: Arc<AtomicU64>,
    state_tx: watch::Sender<SessionState>,
}

/// Cloneable handle for driving and observing the controller
#[derive(Clone)]
pub struct VoiceHandle {
    tx: mpsc::UnboundedSender<ControllerMessage>,
    generation: Arc<AtomicU64>,
    state_rx: watch::Receiver<SessionState>,
}

impl VoiceHandle {
    /// Turn voice mode on
    pub fn enable(&self, mode: ListenMode) {
        self.send(ControllerMessage::Command(VoiceCommand::Enable(mode)));
    }

    /// Turn voice mode off. Takes effect for pending restarts immediately,
    /// even while a dispatch is still running.
    pub fn disable(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.send(ControllerMessage::Command(VoiceCommand::Disable));
    }

    /// Dismiss the emergency overlay
    pub fn dismiss_emergency(&self) {
        self.send(ControllerMessage::Command(VoiceCommand::DismissEmergency));
    }

    /// Stop the controller task
    pub fn shutdown(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.send(ControllerMessage::Command(VoiceCommand::Shutdown));
    }

    /// Sink for a capture service to report events into
    pub fn capture_sink(&self) -> CaptureSink {
        CaptureSink {
            tx: self.tx.clone(),
        }
    }

    /// Current controller state
    pub fn state(&self) -> SessionState {
        *self.state_rx.borrow()
    }

    /// Watch state changes
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_rx.clone()
    }

    fn send(&self, message: ControllerMessage) {
        if self.tx.send(message).is_err() {
            debug!("Voice controller is gone, dropping message");
        }
    }
}

/// Where capture services deliver their events
#[derive(Clone)]
pub struct CaptureSink {
    tx: mpsc::UnboundedSender<ControllerMessage>,
}

impl CaptureSink {
    pub fn emit(&self, event: CaptureEvent) {
        if self.tx.send(ControllerMessage::Capture(event)).is_err() {
            debug!("Voice controller is gone, dropping capture event");
        }
    }
}

/// The one live listening session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionSession {
    pub mode: ListenMode,
    /// Generation this session belongs to; a mismatch means it was cancelled
    pub generation: u64,
    pub last_transcript: String,
}

/// Owns the recognition session and runs the state machine
pub struct SessionController {
    state: SessionState,
    session: Option<RecognitionSession>,
    capture: Box<dyn CaptureService>,
    capturing: bool,
    pending_restart: Option<u64>,
    next_ticket: u64,
    table: CommandTable,
    dispatcher: ActionDispatcher,
    emergency: Arc<EmergencyState>,
    settings: VoiceSettings,
    inbox: ControllerInbox,
}

impl SessionController {
    pub fn new(
        inbox: ControllerInbox,
        capture: Box<dyn CaptureService>,
        dispatcher: ActionDispatcher,
        table: CommandTable,
        settings: VoiceSettings,
    ) -> Self {
        let emergency = dispatcher.emergency().clone();
        Self {
            state: SessionState::Idle,
            session: None,
            capture,
            capturing: false,
            pending_restart: None,
            next_ticket: 0,
            table,
            dispatcher,
            emergency,
            settings,
            inbox,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session(&self) -> Option<&RecognitionSession> {
        self.session.as_ref()
    }

    /// True while the capture hardware is held
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// True while a settle-delay restart is scheduled
    pub fn restart_pending(&self) -> bool {
        self.pending_restart.is_some()
    }

    /// True while an emergency suppresses listening
    pub fn is_suppressed(&self) -> bool {
        self.emergency.is_active()
    }

    /// Process messages until shutdown or until every handle is dropped.
    /// Capture is released on exit.
    pub async fn run(mut self) {
        info!("Voice controller started");
        while self.step().await {}
        self.release();
        info!("Voice controller stopped");
    }

    /// Wait for the next message and process it. Returns false on shutdown.
    pub async fn step(&mut self) -> bool {
        match self.inbox.rx.recv().await {
            Some(ControllerMessage::Command(VoiceCommand::Shutdown)) | None => false,
            Some(message) => {
                self.handle(message).await;
                true
            }
        }
    }

    /// Process one message
    pub async fn handle(&mut self, message: ControllerMessage) {
        match message {
            ControllerMessage::Command(command) => self.handle_command(command),
            ControllerMessage::Capture(event) => self.handle_capture(event).await,
            ControllerMessage::RestartDue { generation, ticket } => {
                self.handle_restart(generation, ticket)
            }
        }
    }

    fn handle_command(&mut self, command: VoiceCommand) {
        match command {
            VoiceCommand::Enable(mode) => self.enable(mode),
            VoiceCommand::Disable => {
                info!("Voice mode disabled");
                self.release();
            }
            VoiceCommand::DismissEmergency => {
                self.emergency.dismiss();
                if self.state == SessionState::Suppressed {
                    info!("Emergency dismissed, voice session closed");
                    self.release();
                }
            }
            VoiceCommand::Shutdown => self.release(),
        }
    }

    fn enable(&mut self, mode: ListenMode) {
        if matches!(
            self.state,
            SessionState::Listening | SessionState::Processing | SessionState::Suppressed
        ) {
            debug!(state = %self.state, "Voice session already active, ignoring enable");
            return;
        }

        self.session = Some(RecognitionSession {
            mode,
            generation: self.current_generation(),
            last_transcript: String::new(),
        });
        self.pending_restart = None;

        if self.emergency.is_active() {
            info!("Emergency in progress, voice session starts suppressed");
            self.set_state(SessionState::Suppressed);
            return;
        }

        info!(mode = %mode, locale = %self.settings.locale, "Voice mode enabled");
        self.start_capture(mode);
    }

    async fn handle_capture(&mut self, event: CaptureEvent) {
        match event {
            CaptureEvent::Started => debug!("Capture started"),
            CaptureEvent::Result {
                transcript,
                is_final,
            } => self.handle_transcript(transcript, is_final).await,
            CaptureEvent::Error(kind) => self.handle_capture_error(kind),
            CaptureEvent::Ended => self.handle_capture_end(),
        }
    }

    async fn handle_transcript(&mut self, transcript: String, is_final: bool) {
        if self.state != SessionState::Listening || !self.capturing {
            debug!(state = %self.state, "Not listening, ignoring transcript");
            return;
        }

        if self.emergency.is_active() {
            debug!("Emergency active, ignoring transcript");
            self.stop_capture();
            self.set_state(SessionState::Suppressed);
            return;
        }

        let trimmed = transcript.trim();
        if trimmed.is_empty() {
            return;
        }
        if !is_final && trimmed.chars().count() <= self.settings.interim_min_chars {
            return;
        }

        // One interpretation at a time: halt capture before doing anything
        self.stop_capture();
        self.set_state(SessionState::Processing);
        if let Some(session) = self.session.as_mut() {
            session.last_transcript = trimmed.to_string();
        }

        let outcome = interpret(
            &self.table,
            &self.dispatcher,
            &self.settings.wake_word,
            trimmed,
        )
        .await;
        self.after_processing(outcome.map(|o| o.intent));
    }

    fn after_processing(&mut self, intent: Option<Intent>) {
        if self.is_cancelled() {
            debug!("Session cancelled during processing");
            self.release();
            return;
        }

        if self.emergency.is_active() {
            info!("Emergency active, listening suppressed until dismissed");
            self.set_state(SessionState::Suppressed);
            return;
        }

        if intent == Some(Intent::Stop) {
            info!("Stop command received, voice session closed");
            self.release();
            return;
        }

        self.continue_or_finish();
    }

    fn handle_capture_error(&mut self, kind: CaptureErrorKind) {
        if kind.is_benign() {
            let noise = PipelineError::RecoverableCaptureNoise(kind);
            debug!("{}", noise);
            if self.state == SessionState::Listening && self.capturing {
                self.stop_capture();
                self.continue_or_finish();
            }
            return;
        }

        let fatal = PipelineError::CaptureFatal(kind.to_string());
        // A late error from a capture that already ended must not cancel a
        // pending restart
        if self.capturing || self.state == SessionState::Processing {
            error!("{}; voice session suspended", fatal);
            self.stop_capture();
            self.pending_restart = None;
            self.set_state(SessionState::Suspended);
        } else {
            warn!(state = %self.state, "{} (no live capture)", fatal);
        }
    }

    fn handle_capture_end(&mut self) {
        if self.state == SessionState::Listening && self.capturing {
            // Recognizer closed the stream on its own
            self.stop_capture();
            self.continue_or_finish();
        }
    }

    /// Restart after the settle delay in continuous mode, otherwise go idle
    fn continue_or_finish(&mut self) {
        let continuous = self
            .session
            .as_ref()
            .is_some_and(|s| s.mode.is_continuous());

        if continuous && !self.emergency.is_active() && !self.is_cancelled() {
            self.schedule_restart();
            self.set_state(SessionState::Listening);
        } else {
            self.release();
        }
    }

    fn schedule_restart(&mut self) {
        if self.pending_restart.is_some() {
            return;
        }

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let generation = self.session.as_ref().map_or(0, |s| s.generation);
        self.pending_restart = Some(ticket);

        let tx = self.inbox.tx.clone();
        let delay = self.settings.settle_delay();
        debug!(?delay, ticket, "Scheduling capture restart");

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(ControllerMessage::RestartDue { generation, ticket });
            }
        });
    }

    fn handle_restart(&mut self, generation: u64, ticket: u64) {
        if generation != self.current_generation() || self.pending_restart != Some(ticket) {
            debug!(ticket, "Stale restart ignored");
            return;
        }
        self.pending_restart = None;

        if self.state != SessionState::Listening || self.capturing {
            return;
        }
        if self.emergency.is_active() {
            self.set_state(SessionState::Suppressed);
            return;
        }

        let mode = self
            .session
            .as_ref()
            .map_or(ListenMode::Continuous, |s| s.mode);
        debug!("Restarting capture");
        self.start_capture(mode);
    }

    fn start_capture(&mut self, mode: ListenMode) {
        match self.capture.start(mode.is_continuous()) {
            Ok(()) => {
                self.capturing = true;
                self.set_state(SessionState::Listening);
            }
            Err(e) => {
                error!("{}", PipelineError::CaptureFatal(e.to_string()));
                self.capturing = false;
                self.set_state(SessionState::Suspended);
            }
        }
    }

    fn stop_capture(&mut self) {
        if self.capturing {
            self.capture.stop();
            self.capturing = false;
        }
    }

    /// Back to idle: capture released, session dropped, restarts cancelled
    fn release(&mut self) {
        self.stop_capture();
        self.pending_restart = None;
        self.session = None;
        self.set_state(SessionState::Idle);
    }

    fn current_generation(&self) -> u64 {
        self.inbox.generation.load(Ordering::SeqCst)
    }

    fn is_cancelled(&self) -> bool {
        self.session
            .as_ref()
            .is_none_or(|s| s.generation != self.current_generation())
    }

    fn set_state(&mut self, state: SessionState) {
        if self.state != state {
            debug!(from = %self.state, to = %state, "Voice state changed");
        }
        self.state = state;
        self.inbox.state_tx.send_replace(state);
    }
}

/// Normalize, gate on the wake word, match and dispatch
async fn interpret(
    table: &CommandTable,
    dispatcher: &ActionDispatcher,
    wake_word: &str,
    transcript: &str,
) -> Option<DispatchOutcome> {
    let normalized = normalize(transcript);

    if !has_wake_word(&normalized, wake_word) {
        debug!("No wake word in \"{}\"", normalized);
        return None;
    }

    let intent = table.match_intent(&normalized);
    info!(intent = %intent, "Heard \"{}\"", normalized);

    let outcome = dispatcher.dispatch(intent, &normalized).await;
    info!("{}", outcome.display);
    Some(outcome)
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.stop_capture();
    }
}
