//! Voice command pipeline
//!
//! Turns captured speech into safety actions:
//! 1. Capture delivers transcripts to the [`SessionController`]
//! 2. Transcripts are normalized and gated on the wake word (default "iris")
//! 3. The [`CommandTable`] resolves an [`Intent`]
//! 4. The [`ActionDispatcher`] performs exactly one action and speaks back
//!
//! Architecture:
//! - SessionController: single task owning the recognition session and its
//!   state machine (idle, listening, processing, suppressed, suspended)
//! - VoiceHandle: cloneable handle for the UI (enable, disable, dismiss)
//! - EmergencyState: overlay shared with the UI; while active, listening is
//!   suppressed
//! - Collaborators: capture, speech, broadcast, police lookup, haptics, links,
//!   location, contacts, history and audio recording, all behind traits in
//!   [`services`]

pub mod commands;
pub mod console;
mod dispatch;
mod emergency;
mod normalize;
pub mod services;
mod session;
mod speech;
mod types;


pub use commands::{CommandMatch, CommandPhrases, CommandTable, Intent};
pub use dispatch::{ActionDispatcher, Collaborators, DispatchOutcome};
pub use emergency::EmergencyState;
pub use normalize::{has_wake_word, normalize};
pub use services::{
    AudioRecorder, CaptureService, ContactSource, Haptics, LinkOpener, LocationProvider,
    PoliceLocator, SosBroadcaster, SosHistory, SpeechSynthesizer,
};
pub use session::{
    CaptureSink, ControllerInbox, RecognitionSession, SessionController, VoiceHandle, channel,
};
pub use speech::Speaker;
pub use types::{
    CaptureError, CaptureErrorKind, CaptureEvent, ControllerMessage, ListenMode, PipelineError,
    SessionState, VoiceCommand,
};
