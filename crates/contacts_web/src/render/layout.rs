//! Page shell: sidebar (search, New, contact list) around routed content.

use super::html::{escape, name_markup};
use super::script::{page_config_json, PAGE_CONFIG_ID, PAGE_SCRIPT};
use contacts_core::interaction::favorite::GLYPH_ON;
use contacts_core::interaction::routes::{contact_path, INDEX_PATH, SEARCH_PARAM};
use contacts_core::{ContactListing, SearchFlow};

pub(crate) const NO_CONTACTS_LABEL: &str = "No contacts";

/// Renders a full document around `main`.
///
/// `active_id` marks the sidebar entry of the contact being shown.
pub(crate) fn page(
    title: &str,
    listing: &ContactListing,
    active_id: Option<&str>,
    main: &str,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<div id="sidebar">
<h1>Contacts</h1>
<div>
{search}
<form method="post" action="{INDEX_PATH}">
<button type="submit">New</button>
</form>
</div>
<nav id="contact-list">
{list}
</nav>
</div>
<div id="detail">
{main}
</div>
<script type="application/json" id="{PAGE_CONFIG_ID}">{config}</script>
<script>{PAGE_SCRIPT}</script>
</body>
</html>
"#,
        title = escape(title),
        search = search_form(listing),
        list = contact_list(listing, active_id),
        config = page_config_json(),
    )
}

fn search_form(listing: &ContactListing) -> String {
    let flow = SearchFlow::new(listing.query.clone());
    format!(
        r#"<form id="search-form" role="search" method="get" action="{INDEX_PATH}" data-replace="{replace}">
<input id="{SEARCH_PARAM}" name="{SEARCH_PARAM}" type="search" placeholder="Search" aria-label="Search contacts" value="{value}">
<div id="search-spinner" role="status" hidden>Searching…</div>
</form>"#,
        replace = !flow.is_first_search(),
        value = escape(flow.input_value()),
    )
}

/// Sidebar list, or the empty-state placeholder.
pub(crate) fn contact_list(listing: &ContactListing, active_id: Option<&str>) -> String {
    if listing.contacts.is_empty() {
        return format!("<p><i>{NO_CONTACTS_LABEL}</i></p>");
    }

    let mut out = String::from("<ul>\n");
    for contact in &listing.contacts {
        let id = contact.id.to_string();
        let class = if active_id == Some(id.as_str()) {
            r#" class="active""#
        } else {
            ""
        };
        let star = if contact.favorite {
            format!(" <span>{GLYPH_ON}</span>")
        } else {
            String::new()
        };
        out.push_str(&format!(
            "<li><a href=\"{href}\"{class}>{name}{star}</a></li>\n",
            href = contact_path(&id),
            name = name_markup(contact.display_name()),
        ));
    }
    out.push_str("</ul>");
    out
}
