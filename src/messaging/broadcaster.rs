//! Default SOS broadcast collaborator

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, info};

use super::links::{normalize_phone, sos_message, whatsapp_link};
use crate::voice::SosBroadcaster;
use crate::{Contact, Location, NotificationLink, SosCategory, SosDispatchResult};

/// Simulated per-contact gateway latency
const DEFAULT_NOTIFY_DELAY: Duration = Duration::from_millis(400);

/// Broadcasts an SOS by building per-contact WhatsApp links
pub struct MessagingBroadcaster {
    country_code: String,
    fallback: Location,
    notify_delay: Duration,
}

impl MessagingBroadcaster {
    pub fn new(country_code: impl Into<String>, fallback: Location) -> Self {
        Self {
            country_code: country_code.into(),
            fallback,
            notify_delay: DEFAULT_NOTIFY_DELAY,
        }
    }

    /// Override the simulated gateway latency
    pub fn with_notify_delay(mut self, delay: Duration) -> Self {
        self.notify_delay = delay;
        self
    }

    /// Best-effort background notification for one contact. Never fails.
    async fn notify(&self, contact: &Contact, category: SosCategory) {
        let phone = normalize_phone(&contact.phone, &self.country_code);
        info!(category = %category, "Pushing SOS alert to +{}", phone);
        if contact.priority == 1 {
            info!("Queuing SOS auto-call for +{}", phone);
        }
        tokio::time::sleep(self.notify_delay).await;
        debug!("Notification step finished for {}", contact.name);
    }
}

impl Default for MessagingBroadcaster {
    fn default() -> Self {
        Self::new("91", Location::FALLBACK)
    }
}

#[async_trait]
impl SosBroadcaster for MessagingBroadcaster {
    async fn dispatch(
        &self,
        location: Option<Location>,
        contacts: &[Contact],
        category: SosCategory,
    ) -> Result<SosDispatchResult> {
        let location = location.unwrap_or(self.fallback);
        let text = sos_message(category, location);

        info!(
            category = %category,
            contacts = contacts.len(),
            "Initiating SOS broadcast from {}",
            location
        );

        let notification_links = contacts
            .iter()
            .map(|contact| NotificationLink {
                contact_name: contact.name.clone(),
                link: whatsapp_link(&normalize_phone(&contact.phone, &self.country_code), &text),
            })
            .collect();

        join_all(contacts.iter().map(|c| self.notify(c, category))).await;

        Ok(SosDispatchResult {
            success: true,
            dispatched_count: contacts.len(),
            notification_links,
        })
    }
}
