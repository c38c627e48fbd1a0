//! EmailJS client against a local stand-in for the provider.

use std::sync::{Arc, Mutex};

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

use baccul_launch::{
    services::{EmailJsClient, NotificationRequest, Notifier},
    NotifyError,
};

type Captured = Arc<Mutex<Vec<Value>>>;

/// Start a fake provider answering every send with `status`
async fn fake_provider(status: StatusCode) -> (String, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route(
            "/api/v1.0/email/send",
            post(move |State(captured): State<Captured>, Json(body): Json<Value>| async move {
                captured.lock().unwrap().push(body);
                (status, if status.is_success() { "OK" } else { "The template ID is invalid" })
            }),
        )
        .with_state(Arc::clone(&captured));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), captured)
}

#[tokio::test]
async fn test_send_posts_credentials_and_template_params() {
    let (url, captured) = fake_provider(StatusCode::OK).await;
    let client = EmailJsClient::new(url, "service_test", "template_test");
    client.init("pk_test").unwrap();

    let request = NotificationRequest::new("user@example.com", "3/1/2025");
    client.send(&request).await.expect("send should succeed");

    let bodies = captured.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["service_id"], "service_test");
    assert_eq!(body["template_id"], "template_test");
    assert_eq!(body["user_id"], "pk_test");
    assert_eq!(body["template_params"]["from_email"], "user@example.com");
    assert_eq!(body["template_params"]["to_email"], "contact@bayellecreditunion.com");
    assert_eq!(body["template_params"]["request_date"], "3/1/2025");
}

#[tokio::test]
async fn test_send_rejection_surfaces_status_and_body() {
    let (url, captured) = fake_provider(StatusCode::BAD_REQUEST).await;
    let client = EmailJsClient::new(url, "service_test", "template_test");
    client.init("pk_test").unwrap();

    let request = NotificationRequest::new("user@example.com", "3/1/2025");
    let err = client.send(&request).await.unwrap_err();

    match err {
        NotifyError::Rejected { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "The template ID is invalid");
        }
        other => panic!("expected rejection, got {other}"),
    }
    assert_eq!(captured.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_send_without_init_makes_no_call() {
    let (url, captured) = fake_provider(StatusCode::OK).await;
    let client = EmailJsClient::new(url, "service_test", "template_test");

    let request = NotificationRequest::new("user@example.com", "3/1/2025");
    let err = client.send(&request).await.unwrap_err();

    assert!(matches!(err, NotifyError::NotInitialized));
    assert!(captured.lock().unwrap().is_empty());
}
