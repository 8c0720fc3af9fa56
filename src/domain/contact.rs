use serde::{Deserialize, Serialize};

/// A trusted emergency contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    /// Phone number as entered by the user (digits are extracted when dispatching)
    pub phone: String,
    /// Relation to the user (e.g., "Mother", "Trusted")
    pub relation: String,
    /// 1 is the highest priority; priority-1 contacts also receive an auto-call
    pub priority: u32,
    #[serde(default)]
    pub is_verified: bool,
}

impl Contact {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
        relation: impl Into<String>,
        priority: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            relation: relation.into(),
            priority,
            is_verified: true,
        }
    }

    /// Contacts seeded on first launch
    pub fn defaults() -> Vec<Contact> {
        vec![
            Contact::new("p1", "Emergency Support 1", "8368278478", "Trusted", 1),
            Contact::new("p2", "Emergency Support 2", "7982828799", "Trusted", 2),
        ]
    }
}

/// Registered user of the app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub phone: String,
    pub city: String,
    #[serde(default)]
    pub is_registered: bool,
}
