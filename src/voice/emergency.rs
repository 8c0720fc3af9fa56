//! Emergency overlay state shared between the dispatcher, the session
//! controller and the UI.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::NotificationLink;

/// Emergency overlay state.
///
/// `active` doubles as the controller's "suppressed" flag: while it is set no
/// transcript is processed and capture never restarts. Only [`dismiss`]
/// clears it.
///
/// [`dismiss`]: EmergencyState::dismiss
#[derive(Debug, Default)]
pub struct EmergencyState {
    active: AtomicBool,
    sent: AtomicBool,
    links: Mutex<Vec<NotificationLink>>,
}

impl EmergencyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the overlay in its unconfirmed state
    pub fn raise(&self) {
        self.sent.store(false, Ordering::SeqCst);
        self.active.store(true, Ordering::SeqCst);
    }

    /// Mark the broadcast as delivered and keep its links for the overlay
    pub fn confirm(&self, links: Vec<NotificationLink>) {
        if let Ok(mut guard) = self.links.lock() {
            *guard = links;
        }
        self.sent.store(true, Ordering::SeqCst);
    }

    /// Close the overlay
    pub fn dismiss(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.sent.store(false, Ordering::SeqCst);
        if let Ok(mut guard) = self.links.lock() {
            guard.clear();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// True once the broadcast for the current emergency succeeded
    pub fn is_sent(&self) -> bool {
        self.sent.load(Ordering::SeqCst)
    }

    /// Per-contact links from the last confirmed broadcast
    pub fn links(&self) -> Vec<NotificationLink> {
        self.links.lock().map(|g| g.clone()).unwrap_or_default()
    }
}
