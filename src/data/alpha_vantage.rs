//! Alpha Vantage provider (backup source)
//!
//! Requires an API key; the free tier allows 25 calls per day. The compact
//! output size only covers ~100 trading days, so the average here can run
//! on a shorter window than the primary source provides.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::StockInfo;
use crate::data::moving_average;
use crate::error::ProviderError;
use crate::models::StockData;

const BASE_URL: &str = "https://www.alphavantage.co";

/// Below this many rows the series is useless even for a degraded average.
const MIN_HISTORY_DAYS: usize = 30;

#[derive(Debug, Deserialize)]
struct DailySeriesResponse {
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    /// Keyed by "YYYY-MM-DD", so the BTreeMap iterates oldest first.
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<String, DailyBar>>,
}

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "4. close")]
    close: String,
}

#[derive(Clone)]
pub struct AlphaVantageProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(client: Client, api_key: String) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl super::DataProvider for AlphaVantageProvider {
    fn name(&self) -> &'static str {
        "alpha_vantage"
    }

    async fn fetch(&self, stock: &StockInfo, days: usize) -> Result<StockData, ProviderError> {
        let url = format!(
            "{}/query?function=TIME_SERIES_DAILY&symbol={}&outputsize=compact&apikey={}",
            self.base_url, stock.symbol, self.api_key
        );

        debug!(symbol = %stock.symbol, "requesting alpha vantage daily series");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let data = parse_daily_body(stock, days, &body)?;
        info!(symbol = %stock.symbol, days = data.days_of_data, "alpha vantage fetch complete");
        Ok(data)
    }
}

/// Parses a TIME_SERIES_DAILY payload into a `StockData`.
pub(crate) fn parse_daily_body(
    stock: &StockInfo,
    days: usize,
    body: &str,
) -> Result<StockData, ProviderError> {
    let parsed: DailySeriesResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::Payload(format!("daily series response: {e}")))?;

    if let Some(message) = parsed.error_message {
        return Err(ProviderError::Api(message));
    }
    if let Some(note) = parsed.note {
        return Err(ProviderError::RateLimited(note));
    }

    let series = parsed.series.ok_or_else(|| ProviderError::NoData {
        symbol: stock.symbol.clone(),
    })?;

    let mut closes = Vec::with_capacity(series.len());
    let mut last_date = None;
    for (date, bar) in &series {
        let close = bar.close.parse::<f64>().map_err(|_| {
            ProviderError::Payload(format!("non-numeric close {:?} on {date}", bar.close))
        })?;
        closes.push(close);
        last_date = Some(date.clone());
    }

    let Some(&current_price) = closes.last() else {
        return Err(ProviderError::NoData {
            symbol: stock.symbol.clone(),
        });
    };

    if closes.len() < MIN_HISTORY_DAYS {
        return Err(ProviderError::InsufficientHistory {
            symbol: stock.symbol.clone(),
            have: closes.len(),
            need: MIN_HISTORY_DAYS,
        });
    }

    if closes.len() < days {
        warn!(
            symbol = %stock.symbol,
            have = closes.len(),
            want = days,
            "short history, averaging over available days"
        );
    }

    // Compact output rarely covers the full window; average what exists.
    let window = days.min(closes.len());
    let ma120 = moving_average(&closes, window).unwrap_or(0.0);

    let timestamp = match last_date {
        Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| ProviderError::Payload(format!("bad series date {date:?}: {e}")))?
            .and_time(NaiveTime::MIN)
            .and_utc(),
        None => chrono::Utc::now(),
    };

    Ok(StockData {
        symbol: stock.symbol.clone(),
        name: stock.name.clone(),
        current_price,
        ma120,
        timestamp,
        days_of_data: closes.len(),
    })
}
