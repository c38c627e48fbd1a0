//! EmailJS REST client

use std::sync::OnceLock;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::notifier::{NotificationRequest, Notifier};
use crate::error::NotifyError;

pub const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com";
pub const DEFAULT_SERVICE_ID: &str = "service_4t9267c";
pub const DEFAULT_TEMPLATE_ID: &str = "template_yv07zka";

const SEND_PATH: &str = "/api/v1.0/email/send";

/// Body of an EmailJS send call
#[derive(Debug, Serialize)]
struct SendPayload<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a NotificationRequest,
}

/// Client for the EmailJS transactional email API.
///
/// The public key is set once through [`EmailJsClient::init`]; sends made
/// before that fail without touching the network.
#[derive(Debug)]
pub struct EmailJsClient {
    http: Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: OnceLock<String>,
}

impl EmailJsClient {
    /// Create an uninitialized client
    pub fn new(
        endpoint: impl Into<String>,
        service_id: impl Into<String>,
        template_id: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: OnceLock::new(),
        }
    }

    /// Configure the caller credential. Only the first call succeeds.
    pub fn init(&self, public_key: impl Into<String>) -> Result<(), NotifyError> {
        self.public_key
            .set(public_key.into())
            .map_err(|_| NotifyError::AlreadyInitialized)?;
        info!("EmailJS client initialized for service {}", self.service_id);
        Ok(())
    }

    fn send_url(&self) -> String {
        format!("{}{}", self.endpoint, SEND_PATH)
    }
}

impl Default for EmailJsClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_SERVICE_ID, DEFAULT_TEMPLATE_ID)
    }
}

#[async_trait]
impl Notifier for EmailJsClient {
    fn is_ready(&self) -> bool {
        self.public_key.get().is_some()
    }

    async fn send(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        let public_key = self.public_key.get().ok_or(NotifyError::NotInitialized)?;

        let payload = SendPayload {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: public_key,
            template_params: request,
        };

        debug!("Sending notification request for {}", request.subscriber_email);

        let response = self.http.post(self.send_url()).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("EmailJS rejected send with {}: {}", status, body);
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!("Notification request delivered for {}", request.subscriber_email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_before_init_fails_fast() {
        // Unroutable endpoint: reaching the network would surface an Http error
        let client = EmailJsClient::new("http://127.0.0.1:9", "svc", "tpl");
        assert!(!client.is_ready());

        let request = NotificationRequest::new("user@example.com", "1/1/2025");
        let result = client.send(&request).await;
        assert!(matches!(result, Err(NotifyError::NotInitialized)));
    }

    #[test]
    fn init_only_once() {
        let client = EmailJsClient::default();
        client.init("first-key").unwrap();
        assert!(client.is_ready());

        assert!(matches!(
            client.init("second-key"),
            Err(NotifyError::AlreadyInitialized)
        ));
    }

    #[test]
    fn endpoint_trailing_slash_is_trimmed() {
        let client = EmailJsClient::new("http://localhost:1234/", "svc", "tpl");
        assert_eq!(client.send_url(), "http://localhost:1234/api/v1.0/email/send");
    }
}
