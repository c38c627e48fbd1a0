//! Notification collaborator interface and the message it carries

use async_trait::async_trait;
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

/// Inbox that receives every launch notification request
pub const RECIPIENT: &str = "contact@bayellecreditunion.com";
pub const SUBJECT: &str = "New Website Launch Notification Request - BaCCUL";
pub const WEBSITE_NAME: &str = "Bayelle Credit Union Ltd (BaCCUL)";

/// Template parameters for one launch notification request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub to_email: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
    pub subscriber_email: String,
    pub website_name: String,
    pub request_date: String,
}

impl NotificationRequest {
    /// Build the request for `email`, dated `request_date`
    pub fn new(email: &str, request_date: impl Into<String>) -> Self {
        Self {
            to_email: RECIPIENT.to_string(),
            from_email: email.to_string(),
            subject: SUBJECT.to_string(),
            message: format!(
                "New subscriber from BaCCUL website: {} would like to be notified when the website launches.",
                email
            ),
            subscriber_email: email.to_string(),
            website_name: WEBSITE_NAME.to_string(),
            request_date: request_date.into(),
        }
    }

    /// Build the request for `email`, dated with today's local date
    pub fn today(email: &str) -> Self {
        Self::new(email, Local::now().format("%-m/%-d/%Y").to_string())
    }
}

/// Something that can deliver a launch notification request
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Whether the credential has been configured
    fn is_ready(&self) -> bool;

    /// Deliver one request. Fails fast with `NotInitialized` when not ready.
    async fn send(&self, request: &NotificationRequest) -> Result<(), NotifyError>;
}
