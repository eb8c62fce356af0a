//! Confirmation gate for destructive submissions.

use super::routes::destroy_path;
use log::info;

pub const DELETE_CONFIRM_MESSAGE: &str = "Please confirm you want to delete this record.";

/// A delete submission that the user confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestroyRequest {
    pub contact_id: String,
    /// POST target for the submission.
    pub action: String,
}

/// Asks `confirm` before producing a delete submission.
///
/// Returns `None` when the user declines; nothing is to be sent then.
pub fn request_destroy<F>(contact_id: &str, confirm: F) -> Option<DestroyRequest>
where
    F: FnOnce(&str) -> bool,
{
    if !confirm(DELETE_CONFIRM_MESSAGE) {
        info!("event=contact_destroy module=interaction status=declined");
        return None;
    }

    Some(DestroyRequest {
        contact_id: contact_id.to_string(),
        action: destroy_path(contact_id),
    })
}
