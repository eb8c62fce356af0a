//! HTTP surface of the contacts application.
//!
//! # Responsibility
//! - Route page requests and form posts onto `ContactService` use-cases.
//! - Render HTML pages and map failures onto 404/400/500 pages.
//!
//! # Invariants
//! - Handlers hold the store lock for exactly one service call and never
//!   across an await point.
//! - Store failures always reach the user as an error page.

#![forbid(unsafe_code)]

pub mod config;
mod error;
mod handlers;
mod render;

use axum::extract::Request;
use axum::middleware::{from_fn, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use contacts_core::{ContactService, ServiceResult, SqliteContactRepository};
use log::{info, warn};
use rusqlite::Connection;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub use config::{ConfigError, ServerConfig};
pub use error::WebError;

/// Shared handle to the contact store.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps an opened, migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs one use-case against the store under the connection lock.
    pub async fn with_service<T, F>(&self, op: F) -> ServiceResult<T>
    where
        F: for<'c> FnOnce(&ContactService<SqliteContactRepository<'c>>) -> ServiceResult<T>,
    {
        let conn = self.conn.lock().await;
        let service = ContactService::new(SqliteContactRepository::new(&conn));
        op(&service)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::index).post(handlers::create_contact),
        )
        .route(
            "/contacts/:contact_id",
            get(handlers::contact_detail).post(handlers::toggle_favorite),
        )
        .route(
            "/contacts/:contact_id/edit",
            get(handlers::edit_contact_form).post(handlers::update_contact),
        )
        .route(
            "/contacts/:contact_id/destroy",
            post(handlers::destroy_contact),
        )
        .route("/healthz", get(handlers::healthz))
        .layer(from_fn(log_requests))
        .with_state(state)
}

/// Serves `state` on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("event=server_start module=web status=ok addr={addr}");
    }
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=server_stop module=web status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=shutdown_signal module=web status=error error={err}");
        std::future::pending::<()>().await;
    }
}

async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    info!(
        "event=http_request module=web status={} method={} path={} duration_ms={}",
        response.status().as_u16(),
        method,
        path,
        started_at.elapsed().as_millis()
    );
    response
}
