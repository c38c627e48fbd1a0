//! Notify-me form state and its transitions

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SubmitError;

/// Message shown when the notification could not be delivered
pub const DELIVERY_FAILED_MESSAGE: &str = "Failed to send notification request. Please try again.";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Cheap syntactic email check: `local@domain.tld`, no whitespace, one `@`.
pub fn validate_email(s: &str) -> bool {
    EMAIL_PATTERN.is_match(s)
}

/// Where the form currently sits in its submission cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    Idle,
    Invalid,
    Submitting,
    Submitted,
    Failed,
}

/// Form-local submission state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionState {
    pub email: String,
    pub is_valid_email: bool,
    pub is_submitting: bool,
    pub is_subscribed: bool,
    pub submit_error: Option<String>,
}

impl SubmissionState {
    /// Create an empty form
    pub fn new() -> Self {
        Self {
            email: String::new(),
            is_valid_email: true,
            is_submitting: false,
            is_subscribed: false,
            submit_error: None,
        }
    }

    pub fn phase(&self) -> FormPhase {
        if self.is_subscribed {
            FormPhase::Submitted
        } else if self.is_submitting {
            FormPhase::Submitting
        } else if self.submit_error.is_some() {
            FormPhase::Failed
        } else if !self.is_valid_email {
            FormPhase::Invalid
        } else {
            FormPhase::Idle
        }
    }

    /// Whether the input and submit control accept interaction
    pub fn accepts_input(&self) -> bool {
        !self.is_submitting && !self.is_subscribed
    }

    /// Replace the raw input. Clears a pending invalid marker.
    pub fn edit(&mut self, email: impl Into<String>) -> Result<(), SubmitError> {
        self.ensure_open()?;
        self.email = email.into();
        self.is_valid_email = true;
        Ok(())
    }

    /// Validate the current input and move to `Submitting`.
    ///
    /// Returns the email to hand to the notifier.
    pub fn begin_submit(&mut self) -> Result<String, SubmitError> {
        self.ensure_open()?;
        self.submit_error = None;

        if !validate_email(&self.email) {
            self.is_valid_email = false;
            return Err(SubmitError::InvalidEmail);
        }

        self.is_valid_email = true;
        self.is_submitting = true;
        Ok(self.email.clone())
    }

    /// Delivery succeeded: terminal, input cleared
    pub fn complete(&mut self) {
        self.is_submitting = false;
        self.is_subscribed = true;
        self.email.clear();
    }

    /// Delivery failed: control re-enabled, input kept for retry
    pub fn fail(&mut self) {
        self.is_submitting = false;
        self.submit_error = Some(DELIVERY_FAILED_MESSAGE.to_string());
    }

    fn ensure_open(&self) -> Result<(), SubmitError> {
        if self.is_subscribed {
            return Err(SubmitError::AlreadySubmitted);
        }
        if self.is_submitting {
            return Err(SubmitError::AlreadyInFlight);
        }
        Ok(())
    }
}

impl Default for SubmissionState {
    fn default() -> Self {
        Self::new()
    }
}
