//! Outbound SOS messaging
//!
//! Builds the deep links used to alert trusted contacts and to find help:
//! - WhatsApp `wa.me` links carrying the SOS text
//! - Google Maps links for the user's position and nearby police stations
//! - Nearest stations from an optional directory of known police stations
//!
//! [`MessagingBroadcaster`] is the default SOS broadcast collaborator. It does
//! not talk to any gateway; per-contact SMS and auto-call steps are logged.

mod broadcaster;
mod links;
mod police;

pub use broadcaster::MessagingBroadcaster;
pub use police::{MapsPoliceLocator, NEAREST_STATIONS};
pub use links::{maps_link, normalize_phone, police_search_link, sos_message, whatsapp_link};
