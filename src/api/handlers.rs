//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    catalog::{ServiceCard, SERVICES},
    error::SubmitError,
    state::{AppState, SubmissionState},
};
use super::responses::{CountdownResponse, EmailInput, FormResponse, HealthResponse, StatusResponse};

type FormResult = Result<Json<FormResponse>, (StatusCode, Json<FormResponse>)>;

/// HTTP status for a rejected form action
fn submit_error_status(e: &SubmitError) -> StatusCode {
    match e {
        SubmitError::InvalidEmail => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitError::AlreadyInFlight | SubmitError::AlreadySubmitted => StatusCode::CONFLICT,
        SubmitError::Delivery(_) => StatusCode::BAD_GATEWAY,
        SubmitError::Task(_) | SubmitError::Lock(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Pair the error status with whatever the form looks like now
fn form_rejection(state: &AppState, e: SubmitError) -> (StatusCode, Json<FormResponse>) {
    let status = submit_error_status(&e);
    match state.get_form_state() {
        Ok(form) => (status, Json(FormResponse::from(form))),
        Err(lock_error) => {
            error!("Failed to read form state: {}", lock_error);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(FormResponse::from(SubmissionState::default())))
        }
    }
}

/// Handle GET /countdown - Current time remaining until launch
pub async fn countdown_handler(State(state): State<Arc<AppState>>) -> Json<CountdownResponse> {
    Json(state.countdown.snapshot().into())
}

/// Handle GET /services - Service cards in display order
pub async fn services_handler() -> Json<Vec<ServiceCard>> {
    Json(SERVICES.to_vec())
}

/// Handle GET /notify - Current form state
pub async fn form_handler(State(state): State<Arc<AppState>>) -> FormResult {
    state.get_form_state()
        .map(|form| Json(form.into()))
        .map_err(|e| {
            error!("Failed to get form state: {}", e);
            form_rejection(&state, e)
        })
}

/// Handle PUT /notify/email - Replace the raw email input
pub async fn edit_email_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<EmailInput>,
) -> FormResult {
    match state.edit_email(input.email.unwrap_or_default()) {
        Ok(form) => Ok(Json(form.into())),
        Err(e) => {
            warn!("Email edit rejected: {}", e);
            Err(form_rejection(&state, e))
        }
    }
}

/// Handle POST /notify - Optionally replace the input, then submit it
pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<EmailInput>,
) -> FormResult {
    if let Some(email) = input.email {
        if let Err(e) = state.edit_email(email) {
            warn!("Submit rejected: {}", e);
            return Err(form_rejection(&state, e));
        }
    }

    match state.submit().await {
        Ok(form) => {
            info!("Notify endpoint called - request delivered");
            Ok(Json(form.into()))
        }
        Err(e) => {
            warn!("Notify endpoint called - submission failed: {}", e);
            Err(form_rejection(&state, e))
        }
    }
}

/// Handle GET /status - Countdown and form summary
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let form = match state.get_form_state() {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to get form state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        countdown: state.countdown.snapshot().into(),
        countdown_running: state.countdown.is_running(),
        form_phase: form.phase(),
        notifier_ready: state.notifier.is_ready(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
