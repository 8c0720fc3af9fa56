//! Documented default configuration written by `iris init`

/// Default configuration content for iris init
pub const DEFAULT_CONFIG: &str = r#"# IRIS Configuration
# ==================
#
# Voice-driven personal safety assistant.
# Say "Iris Emergency", "Iris Check Area", "Iris Where Am I" or "Iris Stop".

# ============================================================================
# VOICE - Recognition session and spoken feedback
# ============================================================================
#
# Available options:
#   continuous         - Keep listening after each command (default: true)
#   settle_delay_ms    - Pause before listening again, so IRIS does not hear
#                        its own reply (default: 1200)
#   interim_min_chars  - Interim transcripts longer than this are acted on
#                        before the recognizer finalizes them (default: 4)
#   unknown_min_chars  - Unrecognized utterances longer than this get a spoken
#                        help message (default: 5)
#   wake_word          - Word that must be spoken before any command (default: "iris")
#   locale             - Recognizer locale (default: "en-IN")
#   silent_mode        - Never speak, only show text (default: false)

[voice]
continuous = true
settle_delay_ms = 1200
interim_min_chars = 4
unknown_min_chars = 5
wake_word = "iris"
locale = "en-IN"
silent_mode = false

# ============================================================================
# SOS - Emergency broadcast
# ============================================================================
#
# Available options:
#   fallback_lat / fallback_lng - Position sent when no GPS fix is available
#                                 (default: centre of India)
#   country_code                - Calling code prepended to 10-digit contact
#                                 numbers, digits only (default: "91")

[sos]
fallback_lat = 20.5937
fallback_lng = 78.9629
country_code = "91"
# police_directory = "/path/to/police_stations.json"
"#;
