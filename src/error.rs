//! Error types for the notify-me workflow

use thiserror::Error;

/// Errors raised by the notification collaborator
#[derive(Error, Debug)]
pub enum NotifyError {
    /// `send` was attempted before the credential was configured
    #[error("Notifier has not been initialized with a public key")]
    NotInitialized,

    /// `init` was called a second time
    #[error("Notifier is already initialized")]
    AlreadyInitialized,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("Delivery rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Errors surfaced by a submit or edit on the form
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("A notification request is already being sent")]
    AlreadyInFlight,

    #[error("A notification request has already been sent")]
    AlreadySubmitted,

    #[error("Delivery failed: {0}")]
    Delivery(#[from] NotifyError),

    #[error("Notification task failed: {0}")]
    Task(String),

    #[error("Failed to lock form state: {0}")]
    Lock(String),
}
