//! Route handlers.
//!
//! Every page handler loads the sidebar listing for the request's `q` and
//! the routed content, then renders one document.

use crate::error::WebError;
use crate::render;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::header::ACCEPT;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use contacts_core::interaction::routes::{contact_path, edit_path, INDEX_PATH};
use contacts_core::{parse_favorite_field, ContactPatch};
use log::info;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct IndexParams {
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FavoriteForm {
    favorite: Option<String>,
}

/// Edit form fields. A missing field leaves the stored value unchanged.
#[derive(Debug, Deserialize)]
pub(crate) struct EditForm {
    first: Option<String>,
    last: Option<String>,
    twitter: Option<String>,
    avatar: Option<String>,
    notes: Option<String>,
}

impl EditForm {
    fn into_patch(self) -> ContactPatch {
        ContactPatch {
            first: self.first.map(Some),
            last: self.last.map(Some),
            twitter: self.twitter.map(Some),
            avatar: self.avatar.map(Some),
            notes: self.notes.map(Some),
            favorite: None,
        }
    }
}

pub(crate) async fn index(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<Html<String>, WebError> {
    let listing = state
        .with_service(|service| service.list_contacts(params.q.as_deref()))
        .await?;
    Ok(Html(render::index_page(&listing)))
}

/// "New": create an empty contact and send the user to edit it.
pub(crate) async fn create_contact(State(state): State<AppState>) -> Result<Redirect, WebError> {
    let contact = state
        .with_service(|service| service.create_empty_contact())
        .await?;
    info!("event=contact_new module=web status=ok id={}", contact.id);
    Ok(Redirect::to(&edit_path(&contact.id.to_string())))
}

pub(crate) async fn contact_detail(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
    Query(params): Query<IndexParams>,
) -> Result<Html<String>, WebError> {
    debug_assert!(!contact_id.is_empty(), "route must supply contact_id");
    let (listing, contact) = state
        .with_service(|service| {
            let contact = service.get_contact(&contact_id)?;
            let listing = service.list_contacts(params.q.as_deref())?;
            Ok((listing, contact))
        })
        .await?;
    Ok(Html(render::detail_page(&listing, &contact)))
}

/// Favorite toggle. Script clients ask for JSON; plain forms get a redirect.
pub(crate) async fn toggle_favorite(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<FavoriteForm>,
) -> Result<Response, WebError> {
    debug_assert!(!contact_id.is_empty(), "route must supply contact_id");
    let favorite = parse_favorite_field(form.favorite.as_deref());
    let contact = state
        .with_service(|service| service.set_favorite(&contact_id, favorite))
        .await?;

    if wants_json(&headers) {
        return Ok(Json(contact).into_response());
    }
    Ok(Redirect::to(&contact_path(&contact_id)).into_response())
}

pub(crate) async fn edit_contact_form(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
    Query(params): Query<IndexParams>,
) -> Result<Html<String>, WebError> {
    debug_assert!(!contact_id.is_empty(), "route must supply contact_id");
    let (listing, contact) = state
        .with_service(|service| {
            let contact = service.get_contact(&contact_id)?;
            let listing = service.list_contacts(params.q.as_deref())?;
            Ok((listing, contact))
        })
        .await?;
    Ok(Html(render::edit_page(&listing, &contact)))
}

pub(crate) async fn update_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
    Form(form): Form<EditForm>,
) -> Result<Redirect, WebError> {
    debug_assert!(!contact_id.is_empty(), "route must supply contact_id");
    let patch = form.into_patch();
    state
        .with_service(|service| service.update_contact(&contact_id, &patch))
        .await?;
    Ok(Redirect::to(&contact_path(&contact_id)))
}

pub(crate) async fn destroy_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
) -> Result<Redirect, WebError> {
    debug_assert!(!contact_id.is_empty(), "route must supply contact_id");
    state
        .with_service(|service| service.destroy_contact(&contact_id))
        .await?;
    Ok(Redirect::to(INDEX_PATH))
}

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}
