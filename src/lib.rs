//! Trading Signal Bot - Scheduled stock signal notifications
//!
//! This library provides the core functionality for the bot including
//! market data fetching, strategy evaluation, state persistence, and
//! Telegram delivery.

pub mod config;
pub mod data;
pub mod error;
pub mod i18n;
pub mod models;
pub mod notifications;
pub mod runner;
pub mod storage;
pub mod strategy;

// Re-export commonly used types
pub use config::Settings;
pub use error::BotError;
pub use models::{Signal, SignalState, SignalType, StockData};

#[cfg(test)]
mod i18n_tests;
#[cfg(test)]
mod storage_tests;
