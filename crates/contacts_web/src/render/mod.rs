//! Server-side HTML rendering.
//!
//! One canonical layout serves every page; content is escaped at the point
//! where it is interpolated.

mod contact;
mod html;
mod layout;
mod script;

use axum::http::StatusCode;
use contacts_core::{Contact, ContactListing};

pub(crate) fn index_page(listing: &ContactListing) -> String {
    layout::page(
        "Contacts",
        listing,
        None,
        "<p id=\"index-page\">Pick a contact from the list, or create a new one.</p>",
    )
}

pub(crate) fn detail_page(listing: &ContactListing, contact: &Contact) -> String {
    let id = contact.id.to_string();
    layout::page(
        &contact.label(),
        listing,
        Some(&id),
        &contact::detail(contact),
    )
}

pub(crate) fn edit_page(listing: &ContactListing, contact: &Contact) -> String {
    let id = contact.id.to_string();
    layout::page(
        &format!("Edit {}", contact.label()),
        listing,
        Some(&id),
        &contact::edit_form(contact),
    )
}

/// Standalone page for failed requests; must not depend on the store.
pub(crate) fn error_page(status: StatusCode, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{code}</title></head>
<body>
<div id="error-page">
<h1>{code} {reason}</h1>
<p><i>{message}</i></p>
<p><a href="/">Back to contacts</a></p>
</div>
</body>
</html>
"#,
        code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("Error"),
        message = html::escape(message),
    )
}

#[cfg(test)]
mod tests {
    use super::index_page;
    use super::layout::NO_CONTACTS_LABEL;
    use contacts_core::{Contact, ContactListing};

    fn listing(contacts: Vec<Contact>, query: Option<&str>) -> ContactListing {
        ContactListing {
            contacts,
            query: query.map(str::to_string),
        }
    }

    #[test]
    fn empty_listing_renders_placeholder() {
        let html = index_page(&listing(Vec::new(), Some("zz")));
        assert!(html.contains(&format!("<i>{NO_CONTACTS_LABEL}</i>")));
    }

    #[test]
    fn list_entries_show_name_fallback_and_star() {
        let unnamed = Contact::new_empty();
        let mut favored = Contact::new_empty();
        favored.first = Some("Ann".to_string());
        favored.favorite = true;

        let html = index_page(&listing(vec![unnamed.clone(), favored.clone()], None));
        let unnamed_entry = html
            .lines()
            .find(|line| line.contains(&unnamed.id.to_string()))
            .expect("unnamed entry rendered");
        assert!(unnamed_entry.contains("<i>No Name</i>"));
        assert!(!unnamed_entry.contains('★'));

        let favored_entry = html
            .lines()
            .find(|line| line.contains(&favored.id.to_string()))
            .expect("favored entry rendered");
        assert!(favored_entry.contains("Ann <span>★</span>"));
    }

    #[test]
    fn search_form_marks_replace_after_first_search() {
        let first = index_page(&listing(Vec::new(), None));
        assert!(first.contains("data-replace=\"false\""));

        let later = index_page(&listing(Vec::new(), Some("a\"b")));
        assert!(later.contains("data-replace=\"true\""));
        assert!(later.contains("value=\"a&quot;b\""));
    }

    #[test]
    fn search_spinner_has_visible_text() {
        let html = index_page(&listing(Vec::new(), None));
        assert!(html.contains(r#"<div id="search-spinner" role="status" hidden>Searching…</div>"#));
    }

    #[test]
    fn every_page_embeds_interaction_config() {
        let html = index_page(&listing(Vec::new(), None));
        let config = html
            .split_once(r#"<script type="application/json" id="page-config">"#)
            .and_then(|(_, rest)| rest.split_once("</script>"))
            .map(|(json, _)| json)
            .expect("config block rendered");
        let config: serde_json::Value = serde_json::from_str(config).expect("config json");
        assert_eq!(config["favorite"]["off"]["label"], "Add to favorites");
        assert_eq!(config["favorite"]["on"]["glyph"], "★");
    }
}
