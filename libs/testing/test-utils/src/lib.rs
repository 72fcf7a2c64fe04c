//! Shared test utilities for domain testing
//!
//! - `StubUpstream`: in-process stand-in for the third-party catalog API
//! - `catalog`: seed data shaped like the real upstream's responses
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{catalog, StubUpstream};
//!
//! #[tokio::test]
//! async fn my_client_test() {
//!     let upstream = StubUpstream::start(catalog()).await;
//!     let base_url = upstream.base_url();
//!     // point an HTTP client at `base_url` ...
//!     assert_eq!(upstream.request_count(), 0);
//! }
//! ```

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Fixed reply used by [`StubUpstream::raw`] for every request.
#[derive(Clone)]
struct CannedResponse {
    status: StatusCode,
    body: &'static str,
}

struct StubState {
    objects: Mutex<Vec<Value>>,
    delay: Option<Duration>,
    next_id: AtomicI64,
    requests: AtomicUsize,
    canned: Option<CannedResponse>,
}

/// An HTTP server on an ephemeral localhost port that behaves like the
/// `/objects` collection of restful-api.dev.
///
/// - `GET /objects` lists the seeded objects in order
/// - `GET /objects/{id}` returns one object or 404
/// - `POST /objects` stores the body under the next numeric id and echoes it
/// - `DELETE /objects/{id}` removes an object or returns 404
///
/// The server task is aborted when this struct is dropped.
pub struct StubUpstream {
    addr: SocketAddr,
    state: Arc<StubState>,
    handle: JoinHandle<()>,
}

impl StubUpstream {
    /// Start a stub serving `seed`.
    ///
    /// Created objects get numeric ids counting up from 100.
    pub async fn start(seed: Vec<Value>) -> Self {
        Self::spawn(seed, None, None).await
    }

    /// Start a stub serving `seed` that waits `delay` before answering
    /// each request, for exercising client timeouts.
    pub async fn slow(seed: Vec<Value>, delay: Duration) -> Self {
        Self::spawn(seed, None, Some(delay)).await
    }

    /// Start a stub that answers every request with `status` and an
    /// upstream-style `{"error": ...}` body.
    pub async fn failing(status: StatusCode) -> Self {
        Self::raw(status, r#"{"error":"upstream unavailable"}"#).await
    }

    /// Start a stub that answers every request with `status` and `body`
    /// verbatim, e.g. to feed the client a malformed document.
    pub async fn raw(status: StatusCode, body: &'static str) -> Self {
        Self::spawn(Vec::new(), Some(CannedResponse { status, body }), None).await
    }

    async fn spawn(
        seed: Vec<Value>,
        canned: Option<CannedResponse>,
        delay: Option<Duration>,
    ) -> Self {
        let state = Arc::new(StubState {
            objects: Mutex::new(seed),
            delay,
            next_id: AtomicI64::new(100),
            requests: AtomicUsize::new(0),
            canned,
        });

        let router = Router::new()
            .route("/objects", get(list_objects).post(create_object))
            .route("/objects/{id}", get(get_object).delete(delete_object))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub upstream");
        let addr = listener.local_addr().expect("Failed to read stub address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Stub upstream stopped: {}", e);
            }
        });

        tracing::info!(%addr, "Stub upstream ready");

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Collection URL, e.g. `http://127.0.0.1:53127/objects`
    pub fn base_url(&self) -> String {
        format!("http://{}/objects", self.addr)
    }

    /// Number of requests the stub has received so far
    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    /// Snapshot of the objects currently stored
    pub fn objects(&self) -> Vec<Value> {
        self.state.objects.lock().expect("stub state poisoned").clone()
    }
}

impl Drop for StubUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Objects as the real upstream serves them: string ids, free-form `data`
/// that is sometimes `null`, keys in mixed case, prices sent as strings, and
/// extra fields the products API ignores.
pub fn catalog() -> Vec<Value> {
    vec![
        json!({"id": "1", "name": "Google Pixel 6 Pro", "data": {"color": "Cloudy White", "capacity": "128 GB"}}),
        json!({"id": "2", "name": "Apple iPhone 12 Mini, 256GB, Blue", "data": null}),
        json!({"id": "3", "name": "Apple iPhone 12 Pro Max", "data": {"color": "Cloudy White", "capacity GB": 512}}),
        json!({"id": "4", "name": "Apple iPhone 11, 64GB", "data": {"price": 389.99, "color": "Purple"}}),
        json!({"id": "5", "name": "Samsung Galaxy Z Fold2", "data": {"price": 689.99, "color": "Brown"}}),
        json!({"id": "6", "name": "Apple AirPods", "data": {"generation": "3rd", "price": 120}}),
        json!({"id": "7", "name": "Apple MacBook Pro 16", "data": {"year": 2019, "price": 1849.99, "CPU model": "Intel Core i9", "Hard disk size": "1 TB"}}),
        json!({"id": "8", "name": "Apple Watch Series 8", "data": {"Strap Colour": "Elderberry", "Case Size": "41mm"}}),
        json!({"id": "9", "name": "Beats Studio3 Wireless", "data": {"Color": "Red", "Description": "High-performance wireless noise cancelling headphones"}}),
        json!({"id": "10", "name": "Apple iPad Air", "data": {"Generation": "4th", "Price": "419.99", "Capacity": "64 GB"}}),
    ]
}

fn id_matches(object: &Value, id: &str) -> bool {
    match object.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

fn not_found(id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": format!("Oject with id={} was not found.", id)})),
    )
        .into_response()
}

/// Counts the request, applies the configured delay and returns the canned
/// reply if one is configured.
async fn intercept(state: &StubState) -> Option<Response> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }
    state.canned.as_ref().map(|canned| {
        (
            canned.status,
            [(header::CONTENT_TYPE, "application/json")],
            canned.body,
        )
            .into_response()
    })
}

async fn list_objects(State(state): State<Arc<StubState>>) -> Response {
    if let Some(response) = intercept(&state).await {
        return response;
    }

    let objects = state.objects.lock().expect("stub state poisoned").clone();
    Json(objects).into_response()
}

async fn get_object(State(state): State<Arc<StubState>>, Path(id): Path<String>) -> Response {
    if let Some(response) = intercept(&state).await {
        return response;
    }

    let objects = state.objects.lock().expect("stub state poisoned");
    match objects.iter().find(|o| id_matches(o, &id)) {
        Some(object) => Json(object.clone()).into_response(),
        None => not_found(&id),
    }
}

async fn create_object(State(state): State<Arc<StubState>>, body: Bytes) -> Response {
    if let Some(response) = intercept(&state).await {
        return response;
    }

    let mut object: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "400 Bad Request. If you are trying to create or update the data, potential issue is that you are sending incorrect body json or it is missing at all."})),
            )
                .into_response();
        }
    };

    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    if let Some(fields) = object.as_object_mut() {
        fields.insert("id".to_string(), json!(id));
        fields.insert("createdAt".to_string(), json!("2024-11-04T10:00:00.000+00:00"));
    }

    state
        .objects
        .lock()
        .expect("stub state poisoned")
        .push(object.clone());

    Json(object).into_response()
}

async fn delete_object(State(state): State<Arc<StubState>>, Path(id): Path<String>) -> Response {
    if let Some(response) = intercept(&state).await {
        return response;
    }

    let mut objects = state.objects.lock().expect("stub state poisoned");
    match objects.iter().position(|o| id_matches(o, &id)) {
        Some(index) => {
            objects.remove(index);
            Json(json!({"message": format!("Object with id = {} has been deleted.", id)}))
                .into_response()
        }
        None => not_found(&id),
    }
}
