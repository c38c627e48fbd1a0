//! External collaborator module
//! 
//! This module contains the notification collaborator used by the notify-me
//! form and its EmailJS implementation.

pub mod emailjs;
pub mod notifier;

// Re-export main types
pub use emailjs::EmailJsClient;
pub use notifier::{NotificationRequest, Notifier};
