//! Configuration and CLI argument handling

use clap::Parser;

use crate::services::emailjs::{DEFAULT_ENDPOINT, DEFAULT_SERVICE_ID, DEFAULT_TEMPLATE_ID};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "baccul-launch")]
#[command(about = "Launch countdown and notify-me relay for the BaCCUL coming-soon page")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// EmailJS public key; without it notification requests fail
    #[arg(long, env = "EMAILJS_PUBLIC_KEY")]
    pub public_key: Option<String>,

    /// EmailJS service id
    #[arg(long, default_value = DEFAULT_SERVICE_ID)]
    pub service_id: String,

    /// EmailJS template id
    #[arg(long, default_value = DEFAULT_TEMPLATE_ID)]
    pub template_id: String,

    /// EmailJS API base URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub emailjs_url: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
