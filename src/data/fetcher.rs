//! Fallback coordination across data providers
//!
//! Primary: Yahoo Finance. Backup: Alpha Vantage, only when a key is
//! configured. A symbol that fails on every provider is reported, not
//! retried; the next scheduled run is the retry.

use reqwest::Client;
use tracing::{error, info, warn};

use crate::config::StockInfo;
use crate::data::alpha_vantage::AlphaVantageProvider;
use crate::data::yahoo::YahooProvider;
use crate::data::DataProvider;
use crate::models::StockData;

/// Why a symbol produced no data this run. A value for the summary
/// message, not an error that travels up the stack.
#[derive(Clone, Debug)]
pub struct FetchError {
    pub symbol: String,
    pub name: String,
    pub provider: String,
    pub error_message: String,
}

pub struct DataFetcherManager {
    primary: Box<dyn DataProvider>,
    secondary: Option<Box<dyn DataProvider>>,
}

impl DataFetcherManager {
    /// Wires the default provider chain: Yahoo primary, Alpha Vantage
    /// backup when a key is configured.
    pub fn new(client: Client, alpha_vantage_api_key: Option<String>) -> Self {
        let primary: Box<dyn DataProvider> = Box::new(YahooProvider::new(client.clone()));
        let secondary = alpha_vantage_api_key
            .map(|key| Box::new(AlphaVantageProvider::new(client, key)) as Box<dyn DataProvider>);
        Self::with_providers(primary, secondary)
    }

    /// Injection point for tests and alternative chains.
    pub fn with_providers(
        primary: Box<dyn DataProvider>,
        secondary: Option<Box<dyn DataProvider>>,
    ) -> Self {
        info!(primary = primary.name(), "data fetcher ready");
        if let Some(backup) = &secondary {
            info!(secondary = backup.name(), "backup provider available");
        }
        Self { primary, secondary }
    }

    /// Tries the primary provider, then the backup. When both fail the
    /// combined error text is returned for the run summary.
    pub async fn fetch_stock_data(
        &self,
        stock: &StockInfo,
        days: usize,
    ) -> Result<StockData, FetchError> {
        let mut errors: Vec<String> = Vec::new();

        info!(symbol = %stock.symbol, provider = self.primary.name(), "fetching");
        match self.primary.fetch(stock, days).await {
            Ok(data) => return Ok(data),
            Err(e) => {
                warn!(
                    symbol = %stock.symbol,
                    provider = self.primary.name(),
                    error = %e,
                    "provider fetch failed"
                );
                errors.push(format!("{}: {}", self.primary.name(), e));
            }
        }

        if let Some(backup) = &self.secondary {
            info!(symbol = %stock.symbol, provider = backup.name(), "trying backup provider");
            match backup.fetch(stock, days).await {
                Ok(data) => return Ok(data),
                Err(e) => {
                    warn!(
                        symbol = %stock.symbol,
                        provider = backup.name(),
                        error = %e,
                        "provider fetch failed"
                    );
                    errors.push(format!("{}: {}", backup.name(), e));
                }
            }
        }

        error!(symbol = %stock.symbol, "all providers failed");
        Err(FetchError {
            symbol: stock.symbol.clone(),
            name: stock.name.clone(),
            provider: "all_providers".to_string(),
            error_message: errors.join(" | "),
        })
    }
}
