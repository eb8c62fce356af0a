//! Contact store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/get/update/delete/list over the `contacts` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate the full record before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - List order is `lower(last)`, `created_at`, `id`; unset last names first.

use crate::db::DbError;
use crate::model::contact::{Contact, ContactId, ContactPatch, ContactValidationError};
use log::info;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    first,
    last,
    twitter,
    notes,
    avatar,
    favorite,
    created_at
FROM contacts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    NotFound(ContactId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid stored contact: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Filter options for listing contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactListQuery {
    /// Free-text search over first/last name. Blank means no filter.
    pub text: Option<String>,
}

impl ContactListQuery {
    pub fn matching(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Lowercased, trimmed needle; `None` when the query does not filter.
    fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether `contact` passes this filter.
    ///
    /// Both sides are folded with Unicode lowercasing; SQLite's `lower()`
    /// only folds ASCII, so matching happens here rather than in SQL.
    pub fn matches(&self, contact: &Contact) -> bool {
        let Some(needle) = self.needle() else {
            return true;
        };
        let first = contact.first.as_deref().unwrap_or("");
        let last = contact.last.as_deref().unwrap_or("");
        let full = format!("{first} {last}");
        [first, last, full.trim()]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Contact store operations.
pub trait ContactStore {
    /// Lists contacts whose name fields contain the query, case-insensitively.
    fn list_contacts(&self, query: &ContactListQuery) -> RepoResult<Vec<Contact>>;
    /// Gets one contact; `Ok(None)` when the id is unknown.
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    /// Persists a new empty contact and returns it.
    fn create_contact(&self) -> RepoResult<Contact>;
    /// Applies a partial update and returns the stored result.
    fn update_contact(&self, id: ContactId, patch: &ContactPatch) -> RepoResult<Contact>;
    /// Removes the contact permanently.
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
    /// Counts every stored contact.
    fn count_contacts(&self) -> RepoResult<u64>;
}

/// SQLite-backed contact store.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Wraps a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn insert(&self, contact: &Contact) -> RepoResult<()> {
        contact.validate()?;
        self.conn.execute(
            "INSERT INTO contacts (
                id, first, last, twitter, notes, avatar, favorite, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                contact.id.to_string(),
                contact.first.as_deref(),
                contact.last.as_deref(),
                contact.twitter.as_deref(),
                contact.notes.as_deref(),
                contact.avatar.as_deref(),
                contact.favorite,
                contact.created_at,
            ],
        )?;
        Ok(())
    }
}

impl ContactStore for SqliteContactRepository<'_> {
    fn list_contacts(&self, query: &ContactListQuery) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL}
             ORDER BY lower(coalesce(last, '')) ASC, created_at ASC, id ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            let contact = parse_contact_row(row)?;
            if query.matches(&contact) {
                contacts.push(contact);
            }
        }
        Ok(contacts)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn create_contact(&self) -> RepoResult<Contact> {
        let contact = Contact::new_empty();
        self.insert(&contact)?;
        info!("event=contact_create module=repo status=ok id={}", contact.id);
        Ok(contact)
    }

    fn update_contact(&self, id: ContactId, patch: &ContactPatch) -> RepoResult<Contact> {
        let tx = self.conn.unchecked_transaction()?;

        let mut contact = SqliteContactRepository::new(&tx)
            .get_contact(id)?
            .ok_or(RepoError::NotFound(id))?;
        contact.apply(patch)?;

        tx.execute(
            "UPDATE contacts
             SET
                first = ?1,
                last = ?2,
                twitter = ?3,
                notes = ?4,
                avatar = ?5,
                favorite = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?7;",
            params![
                contact.first.as_deref(),
                contact.last.as_deref(),
                contact.twitter.as_deref(),
                contact.notes.as_deref(),
                contact.avatar.as_deref(),
                contact.favorite,
                id.to_string(),
            ],
        )?;
        tx.commit()?;

        info!("event=contact_update module=repo status=ok id={id}");
        Ok(contact)
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        info!("event=contact_delete module=repo status=ok id={id}");
        Ok(())
    }

    fn count_contacts(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative contact count `{count}`")))
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid id value `{id_text}` in contacts.id"))
    })?;

    let favorite = match row.get::<_, i64>("favorite")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid favorite value `{other}` in contacts.favorite"
            )));
        }
    };

    let contact = Contact {
        id,
        first: row.get("first")?,
        last: row.get("last")?,
        twitter: row.get("twitter")?,
        notes: row.get("notes")?,
        avatar: row.get("avatar")?,
        favorite,
        created_at: row.get("created_at")?,
    };
    contact.validate()?;
    Ok(contact)
}
