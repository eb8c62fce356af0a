use contacts_core::db::open_db_in_memory;
use contacts_core::{ContactPatch, ContactStore, SqliteContactRepository};
use contacts_web::{build_router, AppState};
use rusqlite::Connection;
use serde_json::Value;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

struct RawResponse {
    status: u16,
    head: String,
    body: String,
}

impl RawResponse {
    fn header(&self, name: &str) -> Option<&str> {
        let prefix = format!("{name}: ");
        self.head.lines().find_map(|line| line.strip_prefix(&prefix))
    }
}

async fn spawn_app(conn: Connection) -> SocketAddr {
    let app = build_router(AppState::new(conn));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> RawResponse {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    if let Some(body) = body {
        req.push_str("Content-Type: application/x-www-form-urlencoded\r\n");
        req.push_str(&format!("Content-Length: {}\r\n\r\n{body}", body.len()));
    } else {
        req.push_str("\r\n");
    }
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    RawResponse {
        status,
        head: head.to_string(),
        body: body.to_string(),
    }
}

async fn get(addr: SocketAddr, path: &str) -> RawResponse {
    send_raw(addr, "GET", path, &[], None).await
}

async fn post_form(addr: SocketAddr, path: &str, body: &str) -> RawResponse {
    send_raw(addr, "POST", path, &[], Some(body)).await
}

fn seeded_conn(names: &[(&str, &str, bool)]) -> (Connection, Vec<String>) {
    let conn = open_db_in_memory().expect("open db");
    let mut ids = Vec::new();
    {
        let store = SqliteContactRepository::new(&conn);
        for (first, last, favorite) in names {
            let contact = store.create_contact().expect("create");
            store
                .update_contact(
                    contact.id,
                    &ContactPatch {
                        first: Some(Some((*first).to_string())),
                        last: Some(Some((*last).to_string())),
                        favorite: Some(*favorite),
                        ..ContactPatch::default()
                    },
                )
                .expect("update");
            ids.push(contact.id.to_string());
        }
    }
    (conn, ids)
}

#[tokio::test]
async fn index_lists_and_filters_contacts() {
    let (conn, ids) = seeded_conn(&[("Ann", "Lee", true), ("Bob", "Marley", false)]);
    let addr = spawn_app(conn).await;

    let res = get(addr, "/").await;
    assert_eq!(res.status, 200);
    assert!(res.body.contains(&format!("href=\"/contacts/{}\"", ids[0])));
    assert!(res.body.contains("Ann Lee <span>★</span>"));
    assert!(res.body.contains("Bob Marley</a>"));
    assert!(res.body.contains("data-replace=\"false\""));

    let res = get(addr, "/?q=ANN").await;
    assert_eq!(res.status, 200);
    assert!(res.body.contains("Ann Lee"));
    assert!(!res.body.contains("Bob Marley"));
    assert!(res.body.contains("value=\"ANN\""));
    assert!(res.body.contains("data-replace=\"true\""));

    let res = get(addr, "/?q=nobody").await;
    assert!(res.body.contains("<i>No contacts</i>"));
}

#[tokio::test]
async fn new_contact_redirects_to_its_edit_page() {
    let addr = spawn_app(open_db_in_memory().expect("open db")).await;

    let res = post_form(addr, "/", "").await;
    assert_eq!(res.status, 303);
    let location = res.header("location").expect("location header").to_string();
    assert!(location.starts_with("/contacts/"));
    assert!(location.ends_with("/edit"));

    let res = get(addr, &location).await;
    assert_eq!(res.status, 200);
    assert!(res.body.contains("id=\"contact-form\""));
    assert!(res.body.contains("<i>No Name</i>"));
}

#[tokio::test]
async fn unknown_contact_is_not_found() {
    let addr = spawn_app(open_db_in_memory().expect("open db")).await;

    for path in [
        "/contacts/0b7a4a1e-3c55-4e3a-9a38-2f0d2a7b1c00",
        "/contacts/not-an-id",
        "/contacts/not-an-id/edit",
    ] {
        let res = get(addr, path).await;
        assert_eq!(res.status, 404, "{path}");
        assert!(res.body.contains("Not Found"));
    }

    let res = post_form(addr, "/contacts/not-an-id", "favorite=true").await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn favorite_toggle_updates_only_that_field() {
    let (conn, ids) = seeded_conn(&[("Ann", "Lee", false)]);
    let addr = spawn_app(conn).await;
    let detail = format!("/contacts/{}", ids[0]);

    let res = get(addr, &detail).await;
    assert!(res.body.contains("aria-label=\"Add to favorites\""));
    assert!(res.body.contains("value=\"true\""));

    let res = post_form(addr, &detail, "favorite=true").await;
    assert_eq!(res.status, 303);
    assert_eq!(res.header("location"), Some(detail.as_str()));

    let res = get(addr, &detail).await;
    assert!(res.body.contains("aria-label=\"Remove from favorites\""));
    assert!(res.body.contains("<h1>Ann Lee"));

    let res = send_raw(
        addr,
        "POST",
        &detail,
        &[("Accept", "application/json")],
        Some("favorite=nonsense"),
    )
    .await;
    assert_eq!(res.status, 200);
    let json: Value = serde_json::from_str(&res.body).expect("contact json");
    assert_eq!(json.get("favorite").and_then(Value::as_bool), Some(false));
    assert_eq!(json.get("first").and_then(Value::as_str), Some("Ann"));
}

#[tokio::test]
async fn edit_form_saves_and_rejects_invalid_values() {
    let (conn, ids) = seeded_conn(&[("Ann", "Lee", false)]);
    let addr = spawn_app(conn).await;
    let edit = format!("/contacts/{}/edit", ids[0]);

    let res = post_form(
        addr,
        &edit,
        "first=Anne&last=&twitter=%40anne&avatar=https%3A%2F%2Fexample.com%2Fa.png&notes=Met+at+conf",
    )
    .await;
    assert_eq!(res.status, 303);

    let res = get(addr, &format!("/contacts/{}", ids[0])).await;
    assert!(res.body.contains("<h1>Anne"));
    assert!(res.body.contains("href=\"https://twitter.com/anne\""));
    assert!(res.body.contains("src=\"https://example.com/a.png\""));
    assert!(res.body.contains("<p>Met at conf</p>"));

    let res = post_form(addr, &edit, "avatar=not+a+url").await;
    assert_eq!(res.status, 400);
    assert!(res.body.contains("avatar"));
}

#[tokio::test]
async fn destroy_removes_contact_and_redirects_home() {
    let (conn, ids) = seeded_conn(&[("Ann", "Lee", false)]);
    let addr = spawn_app(conn).await;

    let res = post_form(addr, &format!("/contacts/{}/destroy", ids[0]), "").await;
    assert_eq!(res.status, 303);
    assert_eq!(res.header("location"), Some("/"));

    let res = get(addr, &format!("/contacts/{}", ids[0])).await;
    assert_eq!(res.status, 404);
    let res = get(addr, "/").await;
    assert!(res.body.contains("<i>No contacts</i>"));
}

#[tokio::test]
async fn store_failure_is_visible() {
    let conn = open_db_in_memory().expect("open db");
    conn.execute_batch("DROP TABLE contacts;").expect("drop table");
    let addr = spawn_app(conn).await;

    let res = get(addr, "/").await;
    assert_eq!(res.status, 500);
    assert!(res.body.contains("contact store failure"));
    assert!(res.body.contains("no such table"));
}

#[tokio::test]
async fn healthz_reports_ok() {
    let addr = spawn_app(open_db_in_memory().expect("open db")).await;
    let res = get(addr, "/healthz").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body, "ok");
}

#[tokio::test]
async fn file_store_keeps_contacts_across_restarts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("data").join("contacts.sqlite3");

    let addr = spawn_app(contacts_core::open_db(&db_path).expect("open file db")).await;
    let res = post_form(addr, "/", "").await;
    let location = res.header("location").expect("location header").to_string();
    let res = post_form(addr, &location, "first=Grace&last=Hopper").await;
    assert_eq!(res.status, 303);

    let addr = spawn_app(contacts_core::open_db(&db_path).expect("reopen file db")).await;
    let res = get(addr, "/?q=hop").await;
    assert!(res.body.contains("Grace Hopper"));
}
