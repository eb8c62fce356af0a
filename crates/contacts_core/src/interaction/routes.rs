//! Page locations shared by the server router and client-side flows.

use url::form_urlencoded;

/// Query parameter carrying the search text on the index page.
pub const SEARCH_PARAM: &str = "q";

pub const INDEX_PATH: &str = "/";

pub fn contact_path(id: &str) -> String {
    format!("/contacts/{id}")
}

pub fn edit_path(id: &str) -> String {
    format!("/contacts/{id}/edit")
}

pub fn destroy_path(id: &str) -> String {
    format!("/contacts/{id}/destroy")
}

/// Index location for a search; `None` yields the bare index.
///
/// An empty string still carries the parameter (`/?q=`), matching what a
/// browser sends for a cleared search field.
pub fn index_location(query: Option<&str>) -> String {
    match query {
        None => INDEX_PATH.to_string(),
        Some(text) => {
            let encoded: String = form_urlencoded::byte_serialize(text.as_bytes()).collect();
            format!("{INDEX_PATH}?{SEARCH_PARAM}={encoded}")
        }
    }
}

/// Extracts the search parameter from a location, if present.
pub fn query_from_location(location: &str) -> Option<String> {
    let (_, raw_query) = location.split_once('?')?;
    let raw_query = raw_query.split('#').next().unwrap_or("");
    form_urlencoded::parse(raw_query.as_bytes())
        .find(|(key, _)| key == SEARCH_PARAM)
        .map(|(_, value)| value.into_owned())
}
