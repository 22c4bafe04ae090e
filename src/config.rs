//! Runtime configuration and the built-in watchlist
//!
//! Settings come from environment variables (loaded through `.env` in dev,
//! injected secrets in CI). Required credentials missing at startup is fatal.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockCategory {
    Index,
    Mag7,
    Custom,
}

/// Static description of one tracked ticker.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StockInfo {
    pub symbol: String,
    pub name: String,
    pub category: StockCategory,
}

impl StockInfo {
    pub fn new(symbol: &str, name: &str, category: StockCategory) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            category,
        }
    }
}

/// The monitored universe: S&P 500 ETF plus the Magnificent 7.
pub fn tracked_stocks() -> Vec<StockInfo> {
    vec![
        StockInfo::new("SPY", "SPDR S&P 500 ETF", StockCategory::Index),
        StockInfo::new("AAPL", "Apple Inc.", StockCategory::Mag7),
        StockInfo::new("MSFT", "Microsoft Corporation", StockCategory::Mag7),
        StockInfo::new("GOOGL", "Alphabet Inc.", StockCategory::Mag7),
        StockInfo::new("AMZN", "Amazon.com Inc.", StockCategory::Mag7),
        StockInfo::new("NVDA", "NVIDIA Corporation", StockCategory::Mag7),
        StockInfo::new("META", "Meta Platforms Inc.", StockCategory::Mag7),
        StockInfo::new("TSLA", "Tesla Inc.", StockCategory::Mag7),
    ]
}

/// Looks up a tracked stock by symbol.
pub fn get_stock_info(symbol: &str) -> Option<StockInfo> {
    tracked_stocks().into_iter().find(|s| s.symbol == symbol)
}

/// Application settings, read once at startup and passed down explicitly.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Bot token from @BotFather.
    pub telegram_bot_token: String,
    /// Chat or channel that receives the run summary.
    pub telegram_chat_id: String,
    /// Backup data source key; the fallback provider is skipped without it.
    pub alpha_vantage_api_key: Option<String>,
    /// Notification language ("en", "zh_CN").
    pub locale: String,
    /// Display timezone label for timestamps in messages.
    pub timezone: String,
    /// Where the per-symbol signal state lives.
    pub state_file: PathBuf,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            telegram_bot_token: require_var("TELEGRAM_BOT_TOKEN")?,
            telegram_chat_id: require_var("TELEGRAM_CHAT_ID")?,
            alpha_vantage_api_key: optional_var("ALPHA_VANTAGE_API_KEY"),
            locale: optional_var("LOCALE").unwrap_or_else(|| "en".to_string()),
            timezone: optional_var("TIMEZONE").unwrap_or_else(|| "America/New_York".to_string()),
            state_file: optional_var("STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("signals.json")),
        })
    }
}

fn require_var(name: &str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar {
            name: name.to_string(),
        }),
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
