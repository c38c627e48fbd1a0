//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown_clock;

// Re-export main types
pub use countdown_clock::{CountdownClock, SystemTime, TimeSource, TICK_PERIOD};
