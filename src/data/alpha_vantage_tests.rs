//! Unit tests for the Alpha Vantage payload parsing.

#[cfg(test)]
mod alpha_vantage_tests {
    use crate::config::{StockCategory, StockInfo};
    use crate::data::alpha_vantage::parse_daily_body;
    use crate::error::ProviderError;
    use chrono::{Days, NaiveDate};

    fn spy() -> StockInfo {
        StockInfo::new("SPY", "SPDR S&P 500 ETF", StockCategory::Index)
    }

    /// `count` consecutive trading days from 2025-01-01 with closes
    /// 1.0, 2.0, ... so averages are easy to reason about.
    fn bars(count: usize) -> Vec<(String, f64)> {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        (0..count)
            .map(|i| {
                let date = start + Days::new(i as u64);
                (date.format("%Y-%m-%d").to_string(), (i + 1) as f64)
            })
            .collect()
    }

    fn daily_body(bars: &[(String, f64)]) -> String {
        let mut series = serde_json::Map::new();
        for (date, close) in bars {
            series.insert(
                date.clone(),
                serde_json::json!({ "4. close": close.to_string() }),
            );
        }
        serde_json::json!({ "Time Series (Daily)": series }).to_string()
    }

    #[test]
    fn test_parse_daily_happy_path() {
        let body = daily_body(&bars(35));

        let data = parse_daily_body(&spy(), 10, &body).unwrap();

        assert_eq!(data.symbol, "SPY");
        assert_eq!(data.current_price, 35.0);
        // Mean of the last 10 closes, 26 through 35
        assert!((data.ma120 - 30.5).abs() < 1e-9);
        assert_eq!(data.days_of_data, 35);
        assert_eq!(
            data.timestamp.date_naive(),
            NaiveDate::from_ymd_opt(2025, 2, 4).unwrap()
        );
    }

    #[test]
    fn test_parse_daily_short_history_averages_available() {
        // 35 rows against a 120-day window still produces an average
        let body = daily_body(&bars(35));

        let data = parse_daily_body(&spy(), 120, &body).unwrap();

        assert_eq!(data.current_price, 35.0);
        assert!((data.ma120 - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_daily_orders_by_date() {
        // The API returns newest-first; the newest close must still win
        let mut entries: Vec<String> = Vec::new();
        for (date, close) in bars(31).iter().rev() {
            entries.push(format!(r#""{date}": {{"4. close": "{close}"}}"#));
        }
        let body = format!(r#"{{"Time Series (Daily)": {{{}}}}}"#, entries.join(","));

        let data = parse_daily_body(&spy(), 5, &body).unwrap();
        assert_eq!(data.current_price, 31.0);
    }

    #[test]
    fn test_parse_daily_api_error() {
        let body = r#"{"Error Message": "Invalid API call. Please retry or visit the documentation"}"#;

        let err = parse_daily_body(&spy(), 120, body).unwrap_err();
        assert!(matches!(err, ProviderError::Api(message) if message.contains("Invalid API call")));
    }

    #[test]
    fn test_parse_daily_rate_limit_note() {
        let body = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."}"#;

        let err = parse_daily_body(&spy(), 120, body).unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited(_)));
    }

    #[test]
    fn test_parse_daily_missing_series() {
        let err = parse_daily_body(&spy(), 120, "{}").unwrap_err();
        assert!(matches!(err, ProviderError::NoData { .. }));
    }

    #[test]
    fn test_parse_daily_below_minimum_history() {
        let body = daily_body(&bars(29));

        let err = parse_daily_body(&spy(), 120, &body).unwrap_err();
        match err {
            ProviderError::InsufficientHistory { have, need, .. } => {
                assert_eq!(have, 29);
                assert_eq!(need, 30);
            }
            other => panic!("expected InsufficientHistory, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_daily_non_numeric_close() {
        let mut series = serde_json::Map::new();
        for (date, close) in &bars(30) {
            series.insert(
                date.clone(),
                serde_json::json!({ "4. close": close.to_string() }),
            );
        }
        series.insert(
            "2025-02-05".to_string(),
            serde_json::json!({ "4. close": "n/a" }),
        );
        let body = serde_json::json!({ "Time Series (Daily)": series }).to_string();

        let err = parse_daily_body(&spy(), 120, &body).unwrap_err();
        assert!(matches!(err, ProviderError::Payload(_)));
    }
}
