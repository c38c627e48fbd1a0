//! Shared fixtures for integration tests

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use tokio::sync::Notify;

use baccul_launch::{
    create_router,
    services::{NotificationRequest, Notifier},
    tasks::{CountdownClock, SystemTime},
    AppState, NotifyError,
};

/// How the fake collaborator answers
#[derive(Clone, Copy)]
pub enum Outcome {
    Deliver,
    Reject,
}

/// Notifier that records requests and can be held open until released
pub struct FakeNotifier {
    outcome: Outcome,
    calls: AtomicUsize,
    pub requests: Mutex<Vec<NotificationRequest>>,
    gate: Option<Arc<Notify>>,
}

impl FakeNotifier {
    pub fn new(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    /// Sends block until the returned gate is notified
    pub fn gated(outcome: Outcome) -> (Arc<Self>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let notifier = Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            gate: Some(Arc::clone(&gate)),
        });
        (notifier, gate)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    fn is_ready(&self) -> bool {
        true
    }

    async fn send(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match self.outcome {
            Outcome::Deliver => Ok(()),
            Outcome::Reject => Err(NotifyError::Rejected {
                status: 503,
                body: "unavailable".to_string(),
            }),
        }
    }
}

pub fn app_state(notifier: Arc<dyn Notifier>) -> Arc<AppState> {
    let countdown = CountdownClock::new(Arc::new(SystemTime));
    Arc::new(AppState::new(0, "127.0.0.1".to_string(), countdown, notifier))
}

pub fn router(state: &Arc<AppState>) -> Router {
    create_router(Arc::clone(state))
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
