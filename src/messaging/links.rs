//! Deep-link and message formatting

use crate::{Location, SosCategory};

/// Google Maps link pinned at `location`
pub fn maps_link(location: Location) -> String {
    format!("https://www.google.com/maps?q={},{}", location.lat, location.lng)
}

/// Google Maps search for police stations around `location`
pub fn police_search_link(location: Location) -> String {
    format!(
        "https://www.google.com/maps/search/police+station/@{},{},15z",
        location.lat, location.lng
    )
}

/// SOS text sent to contacts
pub fn sos_message(category: SosCategory, location: Location) -> String {
    let headline = match category {
        SosCategory::Family => "🚨 EMERGENCY! I need help.",
        SosCategory::Police => "🚨 EMERGENCY! URGENT POLICE REQUIRED!",
    };
    format!(
        "{}\n\nMy CURRENT location:\n{}",
        headline,
        maps_link(location)
    )
}

/// Reduce a phone number to digits and make sure it carries the country code.
///
/// 10-digit local numbers always get the prefix; longer numbers keep an
/// existing prefix.
///
/// Examples (country code "91"):
/// - "83682 78478" -> "918368278478"
/// - "+91 83682 78478" -> "918368278478"
pub fn normalize_phone(raw: &str, country_code: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 10 || !digits.starts_with(country_code) {
        format!("{}{}", country_code, digits)
    } else {
        digits
    }
}

/// WhatsApp click-to-chat link with prefilled text
pub fn whatsapp_link(phone: &str, text: &str) -> String {
    format!("https://wa.me/{}?text={}", phone, urlencoding::encode(text))
}
