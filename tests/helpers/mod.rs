#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use sellerdesk::config::{AccessConfig, ApiConfig, EndpointConfig};
use sellerdesk_shared::Notifier;
use serde_json::{Value, json};

pub const TOKEN: &str = "good-token";

/// In-process stand-in for the marketplace backend.
pub struct FakeBackend {
    pub addr: SocketAddr,
    pub state: Arc<BackendState>,
}

pub struct BackendState {
    pub store_users: Mutex<(u16, Value)>,
    /// Served in order; the last one repeats.
    pub plans: Mutex<VecDeque<Value>>,
    pub balance: Mutex<Value>,
    pub renew_response: Mutex<(u16, Value)>,
    pub renewals: Mutex<Vec<Value>>,
    pub authorizations: Mutex<Vec<String>>,
    pub store_user_hits: AtomicUsize,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            store_users: Mutex::new((200, json!({ "data": [] }))),
            plans: Mutex::new(VecDeque::new()),
            balance: Mutex::new(json!({ "shopping_balance": 0 })),
            renew_response: Mutex::new((200, json!({ "message": "Subscription renewed" }))),
            renewals: Mutex::new(Vec::new()),
            authorizations: Mutex::new(Vec::new()),
            store_user_hits: AtomicUsize::new(0),
        }
    }
}

impl BackendState {
    pub fn set_store_users(&self, status: u16, body: Value) {
        *self.store_users.lock().unwrap() = (status, body);
    }

    pub fn push_plan(&self, body: Value) {
        self.plans.lock().unwrap().push_back(body);
    }

    pub fn set_balance(&self, body: Value) {
        *self.balance.lock().unwrap() = body;
    }

    pub fn set_renew_response(&self, status: u16, body: Value) {
        *self.renew_response.lock().unwrap() = (status, body);
    }

    pub fn renewals(&self) -> Vec<Value> {
        self.renewals.lock().unwrap().clone()
    }

    pub fn authorizations(&self) -> Vec<String> {
        self.authorizations.lock().unwrap().clone()
    }

    pub fn store_user_hits(&self) -> usize {
        self.store_user_hits.load(Ordering::SeqCst)
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        let value = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        self.authorizations.lock().unwrap().push(value.clone());

        if value == format!("Bearer {TOKEN}") {
            Ok(())
        } else {
            Err(reply(401, json!({ "message": "Unauthenticated." })))
        }
    }
}

fn reply(status: u16, body: Value) -> Response {
    let status = StatusCode::from_u16(status).unwrap();
    (status, Json(body)).into_response()
}

async fn store_users(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    state.store_user_hits.fetch_add(1, Ordering::SeqCst);
    let (status, body) = state.store_users.lock().unwrap().clone();
    reply(status, body)
}

async fn plan(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    let mut plans = state.plans.lock().unwrap();
    let body = if plans.len() > 1 {
        plans.pop_front()
    } else {
        plans.front().cloned()
    };
    match body {
        Some(body) => reply(200, body),
        None => reply(404, json!({ "message": "No plan" })),
    }
}

async fn balance(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    reply(200, state.balance.lock().unwrap().clone())
}

async fn renew(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = state.authorize(&headers) {
        return denied;
    }
    state.renewals.lock().unwrap().push(body);
    let (status, body) = state.renew_response.lock().unwrap().clone();
    reply(status, body)
}

async fn broken() -> Response {
    (StatusCode::BAD_GATEWAY, "<html>upstream down</html>").into_response()
}

pub async fn spawn_backend() -> anyhow::Result<FakeBackend> {
    let state = Arc::new(BackendState::default());

    let app = Router::new()
        .route("/api/seller/store/users", get(store_users))
        .route("/api/seller/subscription/plan", get(plan))
        .route("/api/wallet/balance", get(balance))
        .route("/api/seller/subscription/renew", post(renew))
        .route("/api/broken", get(broken))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(FakeBackend { addr, state })
}

impl FakeBackend {
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: format!("http://{}/api", self.addr),
            timeout_secs: 5,
            endpoints: EndpointConfig::default(),
        }
    }
}

pub fn access_config() -> AccessConfig {
    AccessConfig::default()
}

#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<(String, String)> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, title: &str, message: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((title.to_owned(), message.to_owned()));
    }
}
