//! Voice pipeline types: session states, capture events, commands and errors.

/// State of the recognition session controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Voice mode off, capture released
    #[default]
    Idle,
    /// Capture running (or about to restart after the settle delay)
    Listening,
    /// A transcript is being interpreted and its action dispatched
    Processing,
    /// An emergency is in progress; no capture until it is dismissed
    Suppressed,
    /// Capture failed with a non-recoverable error; needs a manual restart
    Suspended,
}

impl SessionState {
    /// Returns true if a session exists (anything but idle)
    pub fn is_active(&self) -> bool {
        !matches!(self, SessionState::Idle)
    }

    /// Returns true if a transcript is being handled
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Processing)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Listening => write!(f, "Listening"),
            SessionState::Processing => write!(f, "Processing"),
            SessionState::Suppressed => write!(f, "Suppressed"),
            SessionState::Suspended => write!(f, "Suspended"),
        }
    }
}

/// How long a session keeps listening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenMode {
    /// Restart capture after every command
    #[default]
    Continuous,
    /// Handle one utterance, then go idle
    SingleShot,
}

impl ListenMode {
    pub fn is_continuous(&self) -> bool {
        matches!(self, ListenMode::Continuous)
    }
}

impl std::fmt::Display for ListenMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenMode::Continuous => write!(f, "Always listening"),
            ListenMode::SingleShot => write!(f, "Single command"),
        }
    }
}

/// Error reported by the capture layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureErrorKind {
    /// Recognizer heard nothing before timing out
    NoSpeech,
    /// Capture was stopped or interrupted
    Aborted,
    /// Anything else (permission denied, device lost, network, ...)
    Other(String),
}

impl CaptureErrorKind {
    /// Map a recognizer error code ("no-speech", "aborted", ...) to a kind
    pub fn from_code(code: &str) -> Self {
        match code {
            "no-speech" => CaptureErrorKind::NoSpeech,
            "aborted" => CaptureErrorKind::Aborted,
            other => CaptureErrorKind::Other(other.to_string()),
        }
    }

    /// Benign errors are normal recognizer noise and keep the loop alive
    pub fn is_benign(&self) -> bool {
        matches!(self, CaptureErrorKind::NoSpeech | CaptureErrorKind::Aborted)
    }
}

impl std::fmt::Display for CaptureErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureErrorKind::NoSpeech => write!(f, "no-speech"),
            CaptureErrorKind::Aborted => write!(f, "aborted"),
            CaptureErrorKind::Other(code) => write!(f, "{}", code),
        }
    }
}

/// Events emitted by a capture service
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    /// Capture is running
    Started,
    /// A (possibly interim) transcript
    Result { transcript: String, is_final: bool },
    /// Capture reported an error
    Error(CaptureErrorKind),
    /// Capture ended (after stop, error, or recognizer timeout)
    Ended,
}

/// Requests from the user interface to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceCommand {
    /// Enable voice mode
    Enable(ListenMode),
    /// Disable voice mode and release the microphone
    Disable,
    /// Dismiss the emergency overlay
    DismissEmergency,
    /// Stop the controller task
    Shutdown,
}

/// Everything the controller consumes, on one ordered stream
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerMessage {
    Capture(CaptureEvent),
    Command(VoiceCommand),
    /// Settle delay elapsed; restart capture if still wanted
    RestartDue { generation: u64, ticket: u64 },
}

/// Failure while starting capture
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Capture already running")]
    AlreadyRunning,

    #[error("Capture device unavailable: {0}")]
    Unavailable(String),
}

/// Errors inside the voice pipeline.
///
/// None of these escape the dispatcher: each one becomes either silent
/// continuation or a spoken message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("Recognizer noise ignored: {0}")]
    RecoverableCaptureNoise(CaptureErrorKind),

    #[error("Capture failed: {0}")]
    CaptureFatal(String),

    #[error("Location unavailable")]
    LocationUnavailable,

    #[error("SOS dispatch failed: {0}")]
    DispatchFailure(String),
}
