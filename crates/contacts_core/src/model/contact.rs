//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record and its partial-update shape.
//! - Own field normalization and validation rules.
//!
//! # Invariants
//! - `id` is stable and never reused for another contact.
//! - Every optional text field is either `None` or a trimmed, non-empty value.
//! - `favorite` is `false` until explicitly set.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;
use uuid::Uuid;

/// Stable identifier for one contact.
pub type ContactId = Uuid;

/// Label rendered when a contact has neither first nor last name.
pub const NO_NAME_LABEL: &str = "No Name";

static TWITTER_HANDLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{1,15}$").expect("valid twitter handle regex"));

/// Canonical contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub first: Option<String>,
    pub last: Option<String>,
    /// Handle without the leading `@`.
    pub twitter: Option<String>,
    pub notes: Option<String>,
    /// Absolute http(s) URL of the avatar image.
    pub avatar: Option<String>,
    pub favorite: bool,
    /// Unix epoch milliseconds. Only used for list ordering.
    pub created_at: i64,
}

impl Contact {
    /// Creates an empty contact with a generated stable ID.
    ///
    /// # Invariants
    /// - All optional fields start as `None`.
    /// - `favorite` starts as `false`.
    pub fn new_empty() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates an empty contact with a caller-provided ID.
    pub fn with_id(id: ContactId) -> Self {
        Self {
            id,
            first: None,
            last: None,
            twitter: None,
            notes: None,
            avatar: None,
            favorite: false,
            created_at: now_epoch_ms(),
        }
    }

    /// Returns "First Last" when either name is present, `None` otherwise.
    pub fn display_name(&self) -> Option<String> {
        if self.first.is_none() && self.last.is_none() {
            return None;
        }
        let joined = format!(
            "{} {}",
            self.first.as_deref().unwrap_or(""),
            self.last.as_deref().unwrap_or("")
        );
        Some(joined.trim().to_string())
    }

    /// Returns the display name or the `No Name` placeholder.
    pub fn label(&self) -> String {
        self.display_name()
            .unwrap_or_else(|| NO_NAME_LABEL.to_string())
    }

    /// Applies a partial update and re-validates the result.
    ///
    /// Fields absent from `patch` are left unchanged. `id` and `created_at`
    /// are never touched. On error `self` is left exactly as it was.
    pub fn apply(&mut self, patch: &ContactPatch) -> Result<(), ContactValidationError> {
        let mut next = self.clone();
        if let Some(first) = &patch.first {
            next.first = normalize_text(first.as_deref());
        }
        if let Some(last) = &patch.last {
            next.last = normalize_text(last.as_deref());
        }
        if let Some(twitter) = &patch.twitter {
            next.twitter = normalize_twitter(twitter.as_deref());
        }
        if let Some(notes) = &patch.notes {
            next.notes = normalize_text(notes.as_deref());
        }
        if let Some(avatar) = &patch.avatar {
            next.avatar = normalize_text(avatar.as_deref());
        }
        if let Some(favorite) = patch.favorite {
            next.favorite = favorite;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Validates field-level invariants.
    ///
    /// # Errors
    /// - `BlankField` when a text field is set but empty after trimming.
    /// - `InvalidTwitterHandle` when the handle has unsupported characters.
    /// - `InvalidAvatarUrl` when the avatar is not an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        let text_fields = [
            ("first", &self.first),
            ("last", &self.last),
            ("twitter", &self.twitter),
            ("notes", &self.notes),
            ("avatar", &self.avatar),
        ];
        for (name, value) in text_fields {
            if let Some(value) = value {
                if value.trim().is_empty() || value.trim() != value {
                    return Err(ContactValidationError::BlankField(name));
                }
            }
        }

        if let Some(handle) = &self.twitter {
            if !TWITTER_HANDLE_RE.is_match(handle) {
                return Err(ContactValidationError::InvalidTwitterHandle(
                    handle.clone(),
                ));
            }
        }

        if let Some(avatar) = &self.avatar {
            let parsed = Url::parse(avatar)
                .map_err(|_| ContactValidationError::InvalidAvatarUrl(avatar.clone()))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ContactValidationError::InvalidAvatarUrl(avatar.clone()));
            }
        }

        Ok(())
    }
}

/// Partial update for [`Contact`].
///
/// Outer `None` leaves a field unchanged; `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPatch {
    pub first: Option<Option<String>>,
    pub last: Option<Option<String>>,
    pub twitter: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub avatar: Option<Option<String>>,
    pub favorite: Option<bool>,
}

impl ContactPatch {
    /// Patch that only sets the favorite flag.
    pub fn favorite(value: bool) -> Self {
        Self {
            favorite: Some(value),
            ..Self::default()
        }
    }

    /// Returns whether applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Validation failures for contact fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    BlankField(&'static str),
    InvalidTwitterHandle(String),
    InvalidAvatarUrl(String),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(name) => write!(f, "field `{name}` must not be blank when set"),
            Self::InvalidTwitterHandle(handle) => {
                write!(f, "invalid twitter handle `{handle}`")
            }
            Self::InvalidAvatarUrl(value) => {
                write!(f, "avatar must be an absolute http(s) URL, got `{value}`")
            }
        }
    }
}

impl Error for ContactValidationError {}

fn normalize_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn normalize_twitter(value: Option<&str>) -> Option<String> {
    normalize_text(value.map(|raw| raw.trim().trim_start_matches('@')))
}

pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{Contact, ContactPatch, ContactValidationError, NO_NAME_LABEL};

    #[test]
    fn empty_contact_has_no_name_and_is_not_favorite() {
        let contact = Contact::new_empty();
        assert_eq!(contact.display_name(), None);
        assert_eq!(contact.label(), NO_NAME_LABEL);
        assert!(!contact.favorite);
        contact.validate().expect("empty contact is valid");
    }

    #[test]
    fn label_joins_present_name_parts() {
        let mut contact = Contact::new_empty();
        contact.first = Some("Shruti".to_string());
        assert_eq!(contact.label(), "Shruti");

        contact.last = Some("Kapoor".to_string());
        assert_eq!(contact.label(), "Shruti Kapoor");

        contact.first = None;
        assert_eq!(contact.label(), "Kapoor");
    }

    #[test]
    fn apply_trims_clears_and_strips_at_sign() {
        let mut contact = Contact::new_empty();
        contact
            .apply(&ContactPatch {
                first: Some(Some("  Ann ".to_string())),
                last: Some(Some("   ".to_string())),
                twitter: Some(Some("@ann_dev".to_string())),
                ..ContactPatch::default()
            })
            .expect("patch should apply");

        assert_eq!(contact.first.as_deref(), Some("Ann"));
        assert_eq!(contact.last, None);
        assert_eq!(contact.twitter.as_deref(), Some("ann_dev"));

        contact
            .apply(&ContactPatch {
                first: Some(None),
                ..ContactPatch::default()
            })
            .expect("clearing should apply");
        assert_eq!(contact.first, None);
        assert_eq!(contact.twitter.as_deref(), Some("ann_dev"));
    }

    #[test]
    fn apply_rejects_bad_avatar_and_handle() {
        let mut contact = Contact::new_empty();
        let err = contact
            .apply(&ContactPatch {
                avatar: Some(Some("not a url".to_string())),
                ..ContactPatch::default()
            })
            .expect_err("relative avatar must be rejected");
        assert!(matches!(err, ContactValidationError::InvalidAvatarUrl(_)));

        let mut contact = Contact::new_empty();
        let err = contact
            .apply(&ContactPatch {
                twitter: Some(Some("has space".to_string())),
                ..ContactPatch::default()
            })
            .expect_err("handle with space must be rejected");
        assert!(matches!(err, ContactValidationError::InvalidTwitterHandle(_)));
    }

    #[test]
    fn rejected_patch_leaves_contact_unchanged() {
        let mut contact = Contact::new_empty();
        contact.first = Some("Ann".to_string());
        let before = contact.clone();

        contact
            .apply(&ContactPatch {
                first: Some(Some("Anna".to_string())),
                favorite: Some(true),
                avatar: Some(Some("ftp://example.com/a.png".to_string())),
                ..ContactPatch::default()
            })
            .expect_err("ftp avatar must be rejected");
        assert_eq!(contact, before);
    }

    #[test]
    fn favorite_patch_only_touches_favorite() {
        let patch = ContactPatch::favorite(true);
        assert!(!patch.is_empty());
        assert_eq!(patch.first, None);

        let mut contact = Contact::new_empty();
        contact.first = Some("Kent".to_string());
        contact.apply(&patch).expect("favorite patch applies");
        assert!(contact.favorite);
        assert_eq!(contact.first.as_deref(), Some("Kent"));
    }
}
