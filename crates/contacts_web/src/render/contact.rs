//! Contact detail card and edit form.

use super::html::{escape, name_markup};
use contacts_core::interaction::favorite::FAVORITE_FIELD;
use contacts_core::interaction::routes::{contact_path, destroy_path, edit_path};
use contacts_core::{Contact, FavoriteToggle, DELETE_CONFIRM_MESSAGE};

pub(crate) fn detail(contact: &Contact) -> String {
    let id = contact.id.to_string();
    let mut out = String::from("<div id=\"contact\">\n");

    match contact.avatar.as_deref() {
        Some(avatar) => out.push_str(&format!(
            "<div><img alt=\"{alt}\" src=\"{src}\"></div>\n",
            alt = escape(&format!("{} avatar", contact.label())),
            src = escape(avatar),
        )),
        None => out.push_str("<div class=\"avatar-placeholder\" aria-hidden=\"true\"></div>\n"),
    }

    out.push_str("<div>\n");
    out.push_str(&format!(
        "<div class=\"contact-heading\">\n<h1>{name}</h1>\n{favorite}\n</div>\n",
        name = name_markup(contact.display_name()),
        favorite = favorite_control(&id, &FavoriteToggle::new(contact.favorite)),
    ));

    if let Some(twitter) = contact.twitter.as_deref() {
        let handle = escape(twitter);
        out.push_str(&format!(
            "<p><a href=\"https://twitter.com/{handle}\" target=\"_blank\" rel=\"noopener noreferrer\">@{handle}</a></p>\n"
        ));
    }
    if let Some(notes) = contact.notes.as_deref() {
        out.push_str(&format!("<p>{}</p>\n", escape(notes)));
    }

    out.push_str(&format!(
        r#"<div>
<form method="get" action="{edit}">
<button type="submit">Edit</button>
</form>
<form method="post" action="{destroy}" data-confirm="{message}">
<button type="submit">Delete</button>
</form>
</div>
</div>
</div>"#,
        edit = edit_path(&id),
        destroy = destroy_path(&id),
        message = escape(DELETE_CONFIRM_MESSAGE),
    ));
    out
}

/// Favorite button drawn from the toggle's displayed state.
pub(crate) fn favorite_control(id: &str, toggle: &FavoriteToggle) -> String {
    let view = toggle.view();
    format!(
        r#"<form method="post" action="{action}" data-favorite-form><button type="submit" name="{FAVORITE_FIELD}" value="{value}" aria-label="{label}">{glyph}</button></form>"#,
        action = contact_path(id),
        value = view.submit_value,
        label = view.label,
        glyph = view.glyph,
    )
}

pub(crate) fn edit_form(contact: &Contact) -> String {
    let id = contact.id.to_string();
    let field = |value: &Option<String>| escape(value.as_deref().unwrap_or(""));
    format!(
        r#"<form id="contact-form" method="post" action="{action}">
<p>
<span>Name</span>
<input aria-label="First name" name="first" type="text" placeholder="First" value="{first}">
<input aria-label="Last name" name="last" type="text" placeholder="Last" value="{last}">
</p>
<label><span>Twitter</span>
<input name="twitter" type="text" placeholder="@jack" value="{twitter}">
</label>
<label><span>Avatar URL</span>
<input aria-label="Avatar URL" name="avatar" type="text" placeholder="https://example.com/avatar.jpg" value="{avatar}">
</label>
<label><span>Notes</span>
<textarea name="notes" rows="6">{notes}</textarea>
</label>
<p>
<button type="submit">Save</button>
<button type="button" data-cancel>Cancel</button>
</p>
</form>"#,
        action = edit_path(&id),
        first = field(&contact.first),
        last = field(&contact.last),
        twitter = field(&contact.twitter),
        avatar = field(&contact.avatar),
        notes = field(&contact.notes),
    )
}
