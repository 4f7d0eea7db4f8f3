//! Shared test harness: an in-process mock of the generic REST backend.
//!
//! Emulates the json-server conventions the client is written against:
//! plain resource collections, incremental integer ids, query-param
//! filtering on GET, PUT replacing the whole record, PATCH merging fields.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

/// In-memory backend state, shared with the test for seeding/inspection.
#[derive(Clone, Default)]
pub struct MockDb {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Vec<Value>>,
    next_id: i64,
}

impl MockDb {
    /// Insert a record directly, returning its assigned id.
    pub fn seed(&self, collection: &str, mut item: Value) -> i64 {
        let mut inner = self.inner.lock().expect("mock db lock");
        inner.next_id += 1;
        let id = inner.next_id;
        item["id"] = json!(id);
        inner.collections.entry(collection.to_string()).or_default().push(item);
        id
    }

    /// Snapshot of a collection.
    pub fn items(&self, collection: &str) -> Vec<Value> {
        let inner = self.inner.lock().expect("mock db lock");
        inner.collections.get(collection).cloned().unwrap_or_default()
    }
}

/// A running mock backend on an ephemeral port.
pub struct MockServer {
    pub base_url: String,
    pub db: MockDb,
}

/// Spawn the mock backend.
pub async fn spawn() -> MockServer {
    let db = MockDb::default();
    let app = Router::new()
        .route("/:collection", get(list).post(create))
        .route(
            "/:collection/:id",
            axum::routing::put(replace).patch(merge).delete(remove),
        )
        .with_state(db.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });

    MockServer {
        base_url: format!("http://{addr}"),
        db,
    }
}

/// Base URL no server listens on, for transport-failure tests.
pub fn dead_url() -> String {
    "http://127.0.0.1:1".to_string()
}

fn matches_query(item: &Value, params: &HashMap<String, String>) -> bool {
    params.iter().all(|(key, expected)| match item.get(key) {
        Some(Value::String(s)) => s == expected,
        Some(other) => other.to_string() == *expected,
        None => false,
    })
}

async fn list(
    State(db): State<MockDb>,
    Path(collection): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Value>> {
    let items = db
        .items(&collection)
        .into_iter()
        .filter(|item| matches_query(item, &params))
        .collect();
    Json(items)
}

async fn create(
    State(db): State<MockDb>,
    Path(collection): Path<String>,
    Json(item): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let id = db.seed(&collection, item);
    let created = db
        .items(&collection)
        .into_iter()
        .find(|i| i["id"] == json!(id))
        .expect("just created");
    (StatusCode::CREATED, Json(created))
}

async fn replace(
    State(db): State<MockDb>,
    Path((collection, id)): Path<(String, i64)>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut inner = db.inner.lock().expect("mock db lock");
    let items = inner.collections.entry(collection).or_default();
    let item = items
        .iter_mut()
        .find(|i| i["id"] == json!(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    body["id"] = json!(id);
    *item = body.clone();
    Ok(Json(body))
}

async fn merge(
    State(db): State<MockDb>,
    Path((collection, id)): Path<(String, i64)>,
    Json(patch): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut inner = db.inner.lock().expect("mock db lock");
    let items = inner.collections.entry(collection).or_default();
    let item = items
        .iter_mut()
        .find(|i| i["id"] == json!(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    if let (Some(target), Some(fields)) = (item.as_object_mut(), patch.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    Ok(Json(item.clone()))
}

async fn remove(
    State(db): State<MockDb>,
    Path((collection, id)): Path<(String, i64)>,
) -> Result<Json<Value>, StatusCode> {
    let mut inner = db.inner.lock().expect("mock db lock");
    let items = inner.collections.entry(collection).or_default();
    let before = items.len();
    items.retain(|i| i["id"] != json!(id));
    if items.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({})))
}
