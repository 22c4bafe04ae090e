//! Yahoo Finance provider (primary source)
//!
//! Uses the public v8 chart endpoint. Free, no API key, but it rejects
//! requests without a browser-looking User-Agent.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::StockInfo;
use crate::data::{moving_average, HISTORY_PAD_DAYS};
use crate::error::ProviderError;
use crate::models::StockData;

const BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Clone)]
pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl super::DataProvider for YahooProvider {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn fetch(&self, stock: &StockInfo, days: usize) -> Result<StockData, ProviderError> {
        // Extra range so the window is still full after dropping null rows.
        let range = days + HISTORY_PAD_DAYS;
        let url = format!(
            "{}/v8/finance/chart/{}?interval=1d&range={}d",
            self.base_url, stock.symbol, range
        );

        debug!(symbol = %stock.symbol, range_days = range, "requesting yahoo chart");

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        parse_chart_body(stock, days, &body)
    }
}

/// Turns a raw chart payload into a `StockData`. Split out of the HTTP path
/// so it can be exercised against canned responses.
pub(crate) fn parse_chart_body(
    stock: &StockInfo,
    days: usize,
    body: &str,
) -> Result<StockData, ProviderError> {
    let parsed: ChartResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::Payload(format!("chart response: {e}")))?;

    if let Some(err) = parsed.chart.error {
        return Err(ProviderError::Api(format!("{}: {}", err.code, err.description)));
    }

    let result = parsed
        .chart
        .result
        .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0)))
        .ok_or_else(|| ProviderError::NoData {
            symbol: stock.symbol.clone(),
        })?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::NoData {
            symbol: stock.symbol.clone(),
        })?;

    // Keep only rows with a real close, pairing each with its timestamp.
    let mut closes = Vec::with_capacity(quote.close.len());
    let mut last_ts = None;
    for (idx, close) in quote.close.into_iter().enumerate() {
        if let Some(price) = close {
            closes.push(price);
            last_ts = result.timestamp.get(idx).copied().or(last_ts);
        }
    }

    let Some(&current_price) = closes.last() else {
        return Err(ProviderError::NoData {
            symbol: stock.symbol.clone(),
        });
    };

    if closes.len() < days {
        return Err(ProviderError::InsufficientHistory {
            symbol: stock.symbol.clone(),
            have: closes.len(),
            need: days,
        });
    }

    let ma120 = moving_average(&closes, days).unwrap_or(0.0);

    let timestamp = match last_ts {
        Some(secs) => DateTime::<Utc>::from_timestamp(secs, 0).ok_or_else(|| {
            ProviderError::Payload(format!("timestamp {secs} out of range"))
        })?,
        None => Utc::now(),
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
