//! Per-run orchestration: fetch every tracked stock, evaluate the
//! strategy against its persisted state, and collect what the summary
//! message needs. A failure on one symbol never aborts the others.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::config::StockInfo;
use crate::data::fetcher::{DataFetcherManager, FetchError};
use crate::data::MA_WINDOW_DAYS;
use crate::models::{Signal, SignalState, StockData};
use crate::storage::state_for;
use crate::strategy::Strategy;

/// Everything a single run produced, in tracked-stock order.
pub struct RunOutcome {
    pub signals: Vec<Signal>,
    pub stock_data: Vec<StockData>,
    pub fetch_errors: Vec<FetchError>,
}

pub async fn process_stocks(
    fetcher: &DataFetcherManager,
    strategy: &dyn Strategy,
    states: &mut BTreeMap<String, SignalState>,
    stocks: &[StockInfo],
) -> RunOutcome {
    let mut outcome = RunOutcome {
        signals: Vec::new(),
        stock_data: Vec::new(),
        fetch_errors: Vec::new(),
    };

    for stock in stocks {
        let data = match fetcher.fetch_stock_data(stock, MA_WINDOW_DAYS).await {
            Ok(data) => data,
            Err(e) => {
                outcome.fetch_errors.push(e);
                continue;
            }
        };

        match data.ma120_deviation() {
            Some(dev) => info!(
                symbol = %stock.symbol,
                price = data.current_price,
                ma120 = data.ma120,
                deviation_pct = dev,
                "stock snapshot"
            ),
            None => warn!(
                symbol = %stock.symbol,
                price = data.current_price,
                "stock snapshot without usable MA120"
            ),
        }

        let state = state_for(states, &stock.symbol);
        let signals = strategy.evaluate(&data, state);
        for signal in &signals {
            strategy.update_state(signal, state);
        }

        outcome.signals.extend(signals);
        outcome.stock_data.push(data);
    }

    info!(
        signals = outcome.signals.len(),
        fetched = outcome.stock_data.len(),
        failed = outcome.fetch_errors.len(),
        "run evaluation complete"
    );

    outcome
}
