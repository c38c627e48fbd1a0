//! State management module
//! 
//! This module contains the countdown and notify-me form state and the
//! application state that owns them.

pub mod app_state;
pub mod countdown_state;
pub mod submission_state;

// Re-export main types
pub use app_state::AppState;
pub use countdown_state::{CountdownState, RemainingTime, LAUNCH_OFFSET_DAYS};
pub use submission_state::{validate_email, FormPhase, SubmissionState};
