//! Custom error types for the signal bot
//!
//! Provides structured, typed errors instead of generic Box<dyn Error>

use std::path::PathBuf;

use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {name}")]
    MissingVar { name: String },
}

/// Market data provider errors
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Unexpected payload: {0}")]
    Payload(String),

    #[error("No price data returned for {symbol}")]
    NoData { symbol: String },

    #[error("Not enough history for {symbol}: have {have}, need {need}")]
    InsufficientHistory {
        symbol: String,
        have: usize,
        need: usize,
    },
}

/// Signal state persistence errors
#[derive(Error, Debug)]
pub enum StateError {
    #[error("State file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("State file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize signal state: {0}")]
    Serialize(serde_json::Error),
}

/// Notification delivery errors
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Telegram API rejected the message: {description}")]
    Api { description: String },
}

/// Top-level fatal errors for the bot binary
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}
