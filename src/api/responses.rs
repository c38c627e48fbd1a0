//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{CountdownState, FormPhase, RemainingTime, SubmissionState};

const SUBMIT_LABEL: &str = "Notify Me";
const SUBMITTING_LABEL: &str = "Sending...";
const INVALID_HINT: &str = "Please enter a valid email address";
const CONFIRMATION_TITLE: &str = "Thank You!";
const CONFIRMATION_TEXT: &str = "We've received your request and will notify you when we launch!";

/// Body of `PUT /notify/email` and `POST /notify`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailInput {
    #[serde(default)]
    pub email: Option<String>,
}

/// Countdown snapshot with display-ready fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownResponse {
    pub remaining: RemainingTime,
    /// Days, hours, minutes, seconds padded to two digits
    pub display: [String; 4],
    pub launched: bool,
    pub target: DateTime<Utc>,
}

impl From<CountdownState> for CountdownResponse {
    fn from(state: CountdownState) -> Self {
        Self {
            remaining: state.remaining,
            display: state.remaining.padded(),
            launched: state.launched,
            target: state.target,
        }
    }
}

/// Form state plus the copy the page shows for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormResponse {
    pub phase: FormPhase,
    pub form: SubmissionState,
    pub submit_label: String,
    pub submit_enabled: bool,
    pub validation_hint: Option<String>,
    pub confirmation: Option<Confirmation>,
    pub timestamp: DateTime<Utc>,
}

/// Persistent confirmation shown once the request is sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confirmation {
    pub title: String,
    pub text: String,
}

impl From<SubmissionState> for FormResponse {
    fn from(form: SubmissionState) -> Self {
        let phase = form.phase();
        Self {
            phase,
            submit_label: if form.is_submitting { SUBMITTING_LABEL } else { SUBMIT_LABEL }.to_string(),
            submit_enabled: form.accepts_input(),
            validation_hint: (!form.is_valid_email).then(|| INVALID_HINT.to_string()),
            confirmation: form.is_subscribed.then(|| Confirmation {
                title: CONFIRMATION_TITLE.to_string(),
                text: CONFIRMATION_TEXT.to_string(),
            }),
            form,
            timestamp: Utc::now(),
        }
    }
}

/// Status response with countdown and form summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub countdown: CountdownResponse,
    pub countdown_running: bool,
    pub form_phase: FormPhase,
    pub notifier_ready: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
