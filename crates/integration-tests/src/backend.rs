use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    extract::{Query, RawQuery, State},
    http::StatusCode,
    routing::get,
};
use tokio::net::TcpListener;

/// A request the mock backend received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Decoded query parameters.
    pub params: HashMap<String, String>,
    /// The query string exactly as sent.
    pub raw_query: String,
}

/// Builder for a temperature service stand-in.
pub struct TemperatureMock {
    status: StatusCode,
    body: String,
}

struct MockState {
    status: StatusCode,
    body: String,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl TemperatureMock {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            body: r#"{"location":"Chapel Hill","temperature":18.25}"#.to_string(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub async fn spawn(self) -> MockBackend {
        let state = Arc::new(MockState {
            status: self.status,
            body: self.body,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/temperature", get(temperature))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockBackend { address, state }
    }
}

impl Default for TemperatureMock {
    fn default() -> Self {
        Self::new()
    }
}

/// A running mock backend.
pub struct MockBackend {
    address: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    /// The endpoint to put in `[backend] url`.
    pub fn url(&self) -> String {
        format!("http://{}/temperature", self.address)
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

/// Returns the endpoint of a port nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{address}/temperature")
}

async fn temperature(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
    RawQuery(raw_query): RawQuery,
) -> (StatusCode, String) {
    state.requests.lock().unwrap().push(RecordedRequest {
        params,
        raw_query: raw_query.unwrap_or_default(),
    });

    (state.status, state.body.clone())
}
