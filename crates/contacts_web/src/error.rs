//! HTTP mapping for contact use-case failures.
//!
//! - unknown contact -> 404 page
//! - rejected field values -> 400 page naming the field problem
//! - store failure -> 500 page carrying the error text

use crate::render;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use contacts_core::ContactServiceError;
use log::{error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum WebError {
    NotFound(String),
    BadRequest(String),
    Store(String),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for WebError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::BadRequest(message) => f.write_str(message),
            Self::Store(message) => write!(f, "contact store failure: {message}"),
        }
    }
}

impl Error for WebError {}

impl From<ContactServiceError> for WebError {
    fn from(value: ContactServiceError) -> Self {
        match value {
            ContactServiceError::ContactNotFound(id) => Self::NotFound(id),
            ContactServiceError::Invalid(err) => Self::BadRequest(err.to_string()),
            ContactServiceError::Repo(err) => Self::Store(err.to_string()),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Store(message) => {
                error!(
                    "event=http_error module=web status=error code={} error={message}",
                    status.as_u16()
                )
            }
            _ => warn!(
                "event=http_error module=web status=rejected code={} error={self}",
                status.as_u16()
            ),
        }

        let body = match &self {
            Self::NotFound(_) => render::error_page(status, "Not Found"),
            _ => render::error_page(status, &self.to_string()),
        };
        (status, Html(body)).into_response()
    }
}
