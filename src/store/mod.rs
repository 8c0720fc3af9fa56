//! Local key-value store
//!
//! One JSON file (default `~/.iris/store.json`) holding the registered user,
//! the trusted contacts and the recent SOS history:
//!
//! ```json
//! {
//!   "user_profile": {
//!     "name": "Asha", "phone": "9876543210", "city": "Delhi", "isRegistered": true
//!   },
//!   "emergency_contacts": [ { "id": "p1", "name": "Emergency Support 1", ... } ],
//!   "sos_logs": [ { "timestamp": "...", "category": "family", ... } ]
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{Config, write_locked};
use crate::voice::{ContactSource, SosHistory};
use crate::{Contact, SosLog, UserProfile};

/// Number of SOS log entries kept
pub const MAX_SOS_LOGS: usize = 10;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read store: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file is corrupt: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Phone number must have exactly 10 digits: {0}")]
    InvalidPhone(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("No contact with id {0}")]
    ContactNotFound(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    user_profile: Option<UserProfile>,

    /// None until the user first edits the list; defaults are used meanwhile
    #[serde(default)]
    emergency_contacts: Option<Vec<Contact>>,

    #[serde(default)]
    sos_logs: Vec<SosLog>,
}

/// JSON-file backed store
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    data: StoreData,
}

impl LocalStore {
    /// Default store location (~/.iris/store.json)
    pub fn default_path() -> PathBuf {
        Config::global_config_dir().join("store.json")
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => StoreData::default(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No store at {}, starting empty", path.display());
                StoreData::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        let content = serde_json::to_vec_pretty(&self.data)?;
        write_locked(&self.path, &content)?;
        Ok(())
    }

    /// Registered user, if any
    pub fn profile(&self) -> Option<&UserProfile> {
        self.data.user_profile.as_ref()
    }

    /// Register the user. The phone must contain exactly 10 digits.
    pub fn register(
        &mut self,
        name: &str,
        phone: &str,
        city: &str,
    ) -> Result<UserProfile, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::MissingField("name".to_string()));
        }

        let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != 10 || digits.len() != phone.trim().len() {
            return Err(StoreError::InvalidPhone(phone.to_string()));
        }

        let profile = UserProfile {
            name: name.to_string(),
            phone: digits,
            city: city.trim().to_string(),
            is_registered: true,
        };
        self.data.user_profile = Some(profile.clone());
        self.save()?;
        info!("Registered {}", profile.name);
        Ok(profile)
    }

    /// Trusted contacts, seeded with the defaults until first edited
    pub fn contacts(&self) -> Vec<Contact> {
        self.data
            .emergency_contacts
            .clone()
            .unwrap_or_else(Contact::defaults)
    }

    /// Add a verified contact at the lowest priority
    pub fn add_contact(
        &mut self,
        name: &str,
        phone: &str,
        relation: &str,
    ) -> Result<Contact, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::MissingField("name".to_string()));
        }
        if !phone.chars().any(|c| c.is_ascii_digit()) {
            return Err(StoreError::InvalidPhone(phone.to_string()));
        }

        let mut contacts = self.contacts();
        let relation = match relation.trim() {
            "" => "Trusted",
            r => r,
        };
        let contact = Contact::new(
            uuid::Uuid::new_v4().to_string(),
            name,
            phone.trim(),
            relation,
            contacts.len() as u32 + 1,
        );
        contacts.push(contact.clone());
        self.data.emergency_contacts = Some(contacts);
        self.save()?;
        info!(id = %contact.id, "Added contact {}", contact.name);
        Ok(contact)
    }

    /// Remove a contact by id
    pub fn remove_contact(&mut self, id: &str) -> Result<Contact, StoreError> {
        let mut contacts = self.contacts();
        let index = contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::ContactNotFound(id.to_string()))?;
        let removed = contacts.remove(index);
        self.data.emergency_contacts = Some(contacts);
        self.save()?;
        info!(id = %removed.id, "Removed contact {}", removed.name);
        Ok(removed)
    }

    /// Record an SOS, newest first, keeping the last [`MAX_SOS_LOGS`]
    pub fn record_sos(&mut self, log: SosLog) -> Result<(), StoreError> {
        self.data.sos_logs.insert(0, log);
        self.data.sos_logs.truncate(MAX_SOS_LOGS);
        self.save()
    }

    /// Recent SOS history, newest first
    pub fn sos_logs(&self) -> &[SosLog] {
        &self.data.sos_logs
    }
}

/// Shared store usable as the pipeline's contact source and SOS history
#[derive(Debug, Clone)]
pub struct StoreHandle(Arc<Mutex<LocalStore>>);

impl StoreHandle {
    pub fn new(store: LocalStore) -> Self {
        Self(Arc::new(Mutex::new(store)))
    }

    /// Run `f` with the store locked
    pub fn with<T>(&self, f: impl FnOnce(&mut LocalStore) -> T) -> T {
        let mut guard = self.0.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

impl ContactSource for StoreHandle {
    fn contacts(&self) -> Vec<Contact> {
        self.with(|store| store.contacts())
    }
}

impl SosHistory for StoreHandle {
    fn record(&self, log: SosLog) {
        if let Err(e) = self.with(|store| store.record_sos(log)) {
            warn!("Failed to record SOS log: {}", e);
        }
    }
}
