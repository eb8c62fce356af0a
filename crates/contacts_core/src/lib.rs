//! Core domain logic for the contacts application.
//! This crate owns the contact invariants, the store and the interaction
//! state machines; it knows nothing about HTTP.

pub mod db;
pub mod interaction;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, open_location, DbError, DbLocation};
pub use interaction::confirm::{request_destroy, DestroyRequest, DELETE_CONFIRM_MESSAGE};
pub use interaction::favorite::{
    favorite_form_value, parse_favorite_field, FavoriteSubmission, FavoriteToggle, FavoriteView,
};
pub use interaction::search::{Navigation, SearchFlow, SearchState};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::contact::{Contact, ContactId, ContactPatch, ContactValidationError, NO_NAME_LABEL};
pub use repo::contact_repo::{
    ContactListQuery, ContactStore, RepoError, RepoResult, SqliteContactRepository,
};
pub use service::contact_service::{
    parse_contact_id, ContactListing, ContactService, ContactServiceError, ServiceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
