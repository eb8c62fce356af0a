//! Contact use-case service.
//!
//! # Responsibility
//! - Map page-level use-cases (list, detail, new, edit, favorite, destroy)
//!   onto store calls.
//! - Turn unknown identifiers into one `ContactNotFound` error.
//!
//! # Invariants
//! - The service never bypasses store validation.
//! - Route identifiers that are not valid ids are treated as unknown.

use crate::model::contact::{Contact, ContactId, ContactPatch, ContactValidationError};
use crate::repo::contact_repo::{ContactListQuery, ContactStore, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Sample contacts used to seed an empty store.
const DEMO_CONTACTS: &[(&str, &str, Option<&str>, Option<&str>)] = &[
    ("Ada", "Lovelace", Some("ada"), Some("Wrote the first published program.")),
    ("Grace", "Hopper", None, Some("Popularized the term debugging.")),
    ("Alan", "Turing", None, None),
    ("Annabel", "Lee", Some("annabel_lee"), None),
    ("Edsger", "Dijkstra", None, Some("Shortest paths, semaphores.")),
];

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ContactServiceError {
    /// No contact exists for the given route identifier.
    ContactNotFound(String),
    /// Submitted field values break a contact invariant.
    Invalid(ContactValidationError),
    /// Store-layer failure.
    Repo(RepoError),
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ContactNotFound(_) => None,
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ContactServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ContactNotFound(id.to_string()),
            RepoError::Validation(err) => Self::Invalid(err),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ContactServiceError>;

/// Result of the list use-case: contacts plus the query that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactListing {
    pub contacts: Vec<Contact>,
    /// The `q` parameter as received; `None` when the page had no search.
    pub query: Option<String>,
}

/// Parses a route identifier. Anything that is not an id cannot exist.
pub fn parse_contact_id(raw: &str) -> Option<ContactId> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Contact service facade over a store implementation.
pub struct ContactService<S: ContactStore> {
    store: S,
}

impl<S: ContactStore> ContactService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists contacts for the index page.
    pub fn list_contacts(&self, query: Option<&str>) -> ServiceResult<ContactListing> {
        let list_query = ContactListQuery {
            text: query.map(str::to_string),
        };
        let contacts = self.store.list_contacts(&list_query)?;
        Ok(ContactListing {
            contacts,
            query: query.map(str::to_string),
        })
    }

    /// Loads one contact by route identifier.
    ///
    /// # Errors
    /// - `ContactNotFound` when the identifier is malformed or unknown.
    pub fn get_contact(&self, raw_id: &str) -> ServiceResult<Contact> {
        let id = self.resolve_id(raw_id)?;
        self.store
            .get_contact(id)?
            .ok_or_else(|| ContactServiceError::ContactNotFound(raw_id.to_string()))
    }

    /// Creates one empty contact for the "New" action.
    pub fn create_empty_contact(&self) -> ServiceResult<Contact> {
        Ok(self.store.create_contact()?)
    }

    /// Applies edit-form fields to an existing contact.
    pub fn update_contact(&self, raw_id: &str, patch: &ContactPatch) -> ServiceResult<Contact> {
        let id = self.resolve_id(raw_id)?;
        Ok(self.store.update_contact(id, patch)?)
    }

    /// Sets only the favorite flag.
    pub fn set_favorite(&self, raw_id: &str, favorite: bool) -> ServiceResult<Contact> {
        self.update_contact(raw_id, &ContactPatch::favorite(favorite))
    }

    /// Deletes a contact permanently.
    pub fn destroy_contact(&self, raw_id: &str) -> ServiceResult<()> {
        let id = self.resolve_id(raw_id)?;
        Ok(self.store.delete_contact(id)?)
    }

    /// Seeds demo contacts when the store is empty.
    ///
    /// Returns how many contacts were created; `0` for a non-empty store.
    pub fn seed_demo_contacts(&self) -> ServiceResult<usize> {
        if self.store.count_contacts()? > 0 {
            info!("event=seed_demo module=service status=skipped reason=store_not_empty");
            return Ok(0);
        }

        for (first, last, twitter, notes) in DEMO_CONTACTS {
            let contact = self.store.create_contact()?;
            let patch = ContactPatch {
                first: Some(Some((*first).to_string())),
                last: Some(Some((*last).to_string())),
                twitter: Some(twitter.map(str::to_string)),
                notes: Some(notes.map(str::to_string)),
                ..ContactPatch::default()
            };
            self.store.update_contact(contact.id, &patch)?;
        }

        info!(
            "event=seed_demo module=service status=ok count={}",
            DEMO_CONTACTS.len()
        );
        Ok(DEMO_CONTACTS.len())
    }

    fn resolve_id(&self, raw_id: &str) -> ServiceResult<ContactId> {
        parse_contact_id(raw_id).ok_or_else(|| {
            warn!("event=contact_lookup module=service status=error error_code=malformed_id");
            ContactServiceError::ContactNotFound(raw_id.to_string())
        })
    }
}
