//! Fixtures shared by the unit tests.

use std::sync::Arc;

use serde_json::{json, Value};
use store::{ClientConfig, MemoryStore};
use wiremock::MockServer;

use crate::client::ApiClient;
use crate::models::User;
use crate::session::Session;

pub(crate) fn sample_user_json() -> Value {
    json!({
        "id": "u-1",
        "name": "Amina",
        "email": "amina@campus.example",
        "department": "Informatique",
        "faculty": null,
        "year_of_study": "L3",
        "role": "student",
        "reputation": 12,
        "created_at": "2025-01-10T08:00:00+00:00",
        "updated_at": "2025-01-10T08:00:00"
    })
}

pub(crate) fn sample_user() -> User {
    serde_json::from_value(sample_user_json()).expect("fixture parses")
}

pub(crate) fn record_json(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Record {id}"),
        "description": null,
        "subject_id": "3",
        "author_id": "u-1",
        "author_name": "Amina",
        "type": "pdf",
        "file_url": format!("https://cdn.example/{id}.pdf"),
        "likes": 2,
        "views": 10,
        "liked_by": [],
        "created_at": "2025-02-01T09:00:00Z",
        "updated_at": "2025-02-01T09:00:00Z"
    })
}

/// Nothing listens on the discard port, so every request fails to connect.
pub(crate) const UNREACHABLE_ORIGIN: &str = "http://127.0.0.1:9";

/// A client over an existing session, so several clients can share it.
pub(crate) fn client_on(origin: &str, session: Session) -> ApiClient {
    ApiClient::new(&ClientConfig::new(origin), session).expect("client builds")
}

fn client_for(origin: &str, store: MemoryStore) -> ApiClient {
    client_on(origin, Session::new(Arc::new(store)))
}

pub(crate) fn client_with_store(server: &MockServer, store: MemoryStore) -> ApiClient {
    client_for(&server.uri(), store)
}

pub(crate) fn unreachable_client(store: MemoryStore) -> ApiClient {
    client_for(UNREACHABLE_ORIGIN, store)
}

pub(crate) fn anonymous_client(server: &MockServer) -> ApiClient {
    client_with_store(server, MemoryStore::new())
}

/// A client whose session already holds `token` and the sample identity.
pub(crate) fn signed_in_client(server: &MockServer, token: &str) -> ApiClient {
    let client = anonymous_client(server);
    client.session().store_token(token);
    client.session().establish(token, sample_user());
    client
}
