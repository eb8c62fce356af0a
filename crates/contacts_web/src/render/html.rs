//! Minimal HTML helpers.

/// Escapes text for element content and double-quoted attribute values.
pub(crate) fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Name markup shared by list entries and the detail heading.
pub(crate) fn name_markup(display_name: Option<String>) -> String {
    match display_name {
        Some(name) => escape(&name),
        None => format!("<i>{}</i>", contacts_core::NO_NAME_LABEL),
    }
}

#[cfg(test)]
mod tests {
    use super::{escape, name_markup};

    #[test]
    fn escape_covers_markup_and_quotes() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn missing_name_renders_placeholder() {
        assert_eq!(name_markup(None), "<i>No Name</i>");
        assert_eq!(name_markup(Some("<b>".to_string())), "&lt;b&gt;");
    }
}
