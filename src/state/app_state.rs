//! Main application state management

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use super::SubmissionState;
use crate::{
    error::SubmitError,
    services::{NotificationRequest, Notifier},
    tasks::CountdownClock,
};

/// Main application state: one countdown and one notify-me form
pub struct AppState {
    /// Launch countdown and its timer
    pub countdown: CountdownClock,
    /// Notify-me form
    pub form: Arc<Mutex<SubmissionState>>,
    /// Collaborator that delivers notification requests
    pub notifier: Arc<dyn Notifier>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last form action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState with an empty form
    pub fn new(port: u16, host: String, countdown: CountdownClock, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            countdown,
            form: Arc::new(Mutex::new(SubmissionState::new())),
            notifier,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Apply a form transition under the lock and record it as the last action.
    ///
    /// The transition's changes are kept even when it returns an error.
    pub fn update_form<T, F>(&self, action: &str, updater: F) -> Result<(T, SubmissionState), SubmitError>
    where
        F: FnOnce(&mut SubmissionState) -> Result<T, SubmitError>,
    {
        let mut form = self.form.lock()
            .map_err(|e| SubmitError::Lock(e.to_string()))?;

        let result = updater(&mut form);
        let new_form = form.clone();
        drop(form); // Release the lock early

        record_action(&self.last_action, &self.last_action_time, action);

        result.map(|value| (value, new_form))
    }

    /// Replace the raw email input
    pub fn edit_email(&self, email: String) -> Result<SubmissionState, SubmitError> {
        self.update_form("edit", |form| form.edit(email))
            .map(|(_, form)| form)
    }

    /// Validate the current input and relay it to the notifier.
    ///
    /// The send runs on its own task, so dropping the caller neither cancels
    /// it nor skips the transition out of `Submitting`. A second submit while
    /// one is in flight is rejected before any network call.
    pub async fn submit(&self) -> Result<SubmissionState, SubmitError> {
        let (email, _) = self.update_form("submit", |form| form.begin_submit())?;
        info!("Submitting notification request for {}", email);

        let delivery = Delivery {
            form: Arc::clone(&self.form),
            last_action: Arc::clone(&self.last_action),
            last_action_time: Arc::clone(&self.last_action_time),
            settled: false,
        };
        let notifier = Arc::clone(&self.notifier);

        let handle = tokio::spawn(async move {
            let request = NotificationRequest::today(&email);
            match notifier.send(&request).await {
                Ok(()) => {
                    info!("Notification request accepted for {}", email);
                    Ok(delivery.settle("submitted", SubmissionState::complete))
                }
                Err(e) => {
                    error!("Notification request for {} failed: {}", email, e);
                    delivery.settle("failed", SubmissionState::fail);
                    Err(e)
                }
            }
        });

        match handle.await {
            Ok(Ok(form)) => Ok(form),
            Ok(Err(e)) => Err(SubmitError::Delivery(e)),
            Err(e) => {
                error!("Notification task ended abnormally: {}", e);
                Err(SubmitError::Task(e.to_string()))
            }
        }
    }

    /// Get current form state
    pub fn get_form_state(&self) -> Result<SubmissionState, SubmitError> {
        self.form.lock()
            .map(|form| form.clone())
            .map_err(|e| SubmitError::Lock(e.to_string()))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

fn record_action(
    last_action: &Mutex<Option<String>>,
    last_action_time: &Mutex<Option<DateTime<Utc>>>,
    action: &str,
) {
    if let Ok(mut last_action) = last_action.lock() {
        *last_action = Some(action.to_string());
    }
    if let Ok(mut last_time) = last_action_time.lock() {
        *last_time = Some(Utc::now());
    }
}

/// An in-flight send's claim on the form.
///
/// Settling moves the form out of `Submitting`. If the claim is dropped
/// unsettled (the task panicked or was aborted) the form is marked failed.
/// A poisoned lock is recovered so the in-flight flag is always cleared.
struct Delivery {
    form: Arc<Mutex<SubmissionState>>,
    last_action: Arc<Mutex<Option<String>>>,
    last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    settled: bool,
}

impl Delivery {
    fn settle(mut self, action: &str, transition: fn(&mut SubmissionState)) -> SubmissionState {
        self.settled = true;
        self.apply(action, transition)
    }

    fn apply(&self, action: &str, transition: fn(&mut SubmissionState)) -> SubmissionState {
        let mut form = self.form.lock().unwrap_or_else(PoisonError::into_inner);
        transition(&mut form);
        let new_form = form.clone();
        drop(form);

        record_action(&self.last_action, &self.last_action_time, action);
        new_form
    }
}

impl Drop for Delivery {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Notification task ended before settling, marking request failed");
            self.apply("failed", SubmissionState::fail);
        }
    }
}
