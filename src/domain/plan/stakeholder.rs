//! Stakeholders and the fixed contact directory.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{StakeholderId, ValidationError};

/// A person attached to the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub id: StakeholderId,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Stakeholder {
    /// Creates a stakeholder with a fresh id.
    ///
    /// The name is required; a blank name is a validation error so the
    /// caller can surface it without touching state.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id: StakeholderId::new(),
            name,
            title: title.into(),
            email: email.into(),
            notes: None,
        })
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// An entry in the global contact directory.
///
/// Contacts carry stable ids so adding the same contact twice is
/// detectable; the stakeholder list holds each contact at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: StakeholderId,
    pub name: &'static str,
    pub title: &'static str,
}

impl Contact {
    /// Converts the directory entry into a plan stakeholder.
    pub fn to_stakeholder(&self) -> Stakeholder {
        Stakeholder {
            id: self.id,
            name: self.name.to_string(),
            title: self.title.to_string(),
            email: String::new(),
            notes: None,
        }
    }
}

static DIRECTORY: Lazy<Vec<Contact>> = Lazy::new(|| {
    vec![
        Contact {
            id: StakeholderId::from_uuid(Uuid::from_u128(0xC0_0001)),
            name: "Jane Doe",
            title: "VP, Sales",
        },
        Contact {
            id: StakeholderId::from_uuid(Uuid::from_u128(0xC0_0002)),
            name: "John Smith",
            title: "Project Manager",
        },
        Contact {
            id: StakeholderId::from_uuid(Uuid::from_u128(0xC0_0003)),
            name: "Samantha Ray",
            title: "Director of Operations",
        },
        Contact {
            id: StakeholderId::from_uuid(Uuid::from_u128(0xC0_0004)),
            name: "Mike Chen",
            title: "Lead Engineer",
        },
    ]
});

/// The fixed contact directory.
pub fn contact_directory() -> &'static [Contact] {
    &DIRECTORY
}

/// Finds a directory contact by id.
pub fn find_contact(id: StakeholderId) -> Option<&'static Contact> {
    DIRECTORY.iter().find(|c| c.id == id)
}
