//! Voice commands - mapping trigger phrases to intents
//!
//! The phrase table is ordered. Matching walks it top to bottom and the first
//! intent owning a phrase contained in the utterance wins, so when an
//! utterance contains phrases of two intents the earlier one is chosen.
//!
//! Default table:
//! - SOS: "iris emergency", "iris help", "iris sos"
//! - AREA: "iris check area", "iris area", "iris scan area"
//! - LOCATION: "iris where am i", "iris location", "iris my location"
//! - STOP: "iris stop", "iris cancel"

mod intent;
mod table;

pub use intent::{CommandPhrases, Intent};
pub use table::{CommandMatch, CommandTable};
