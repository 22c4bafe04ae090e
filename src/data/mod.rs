//! Market data providers and fallback coordination

pub mod alpha_vantage;
pub mod fetcher;
pub mod yahoo;

#[cfg(test)]
mod alpha_vantage_tests;

use async_trait::async_trait;

use crate::config::StockInfo;
use crate::error::ProviderError;
use crate::models::StockData;

/// Moving-average window the deviation strategy compares against.
pub const MA_WINDOW_DAYS: usize = 120;

/// Extra days requested past the MA window so holidays and missing rows
/// do not starve the average.
pub const HISTORY_PAD_DAYS: usize = 30;

/// A source of daily price history for one symbol.
///
/// Implementations convert every transport or payload failure into a
/// `ProviderError`; nothing leaks past this boundary.
#[async_trait]
pub trait DataProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, stock: &StockInfo, days: usize) -> Result<StockData, ProviderError>;
}

/// Mean of the last `window` closes. Uses whatever is available when the
/// series is shorter than the window.
pub fn moving_average(closes: &[f64], window: usize) -> Option<f64> {
    if closes.is_empty() || window == 0 {
        return None;
    }
    let start = closes.len().saturating_sub(window);
    let tail = &closes[start..];
    Some(tail.iter().sum::<f64>() / tail.len() as f64)
}
