//! Settings configuration types

mod sos;
mod voice;

pub use sos::SosSettings;
pub use voice::VoiceSettings;
