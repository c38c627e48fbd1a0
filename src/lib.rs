//! BaCCUL Launch - countdown and notify-me relay for a coming-soon page
//!
//! This library provides the launch countdown clock, the notify-me form
//! workflow and the EmailJS collaborator it relays submissions to.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{NotifyError, SubmitError};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
