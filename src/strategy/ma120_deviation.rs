//! MA120 deviation ladder
//!
//! Signal 1 fires when price closes 15% or more below MA120. Signal 2 fires
//! when price drops another 20% below the signal 1 entry. Each tranche
//! suggests 20% of capital, capping deployment at 40% per symbol. A ladder
//! with both tranches filled resets on the next evaluation, so a later
//! drawdown cycle can fire again.

use tracing::{error, info, warn};

use crate::models::{Signal, SignalState, SignalType, StockData};
use crate::strategy::Strategy;

#[derive(Clone, Copy, Debug, Default)]
pub struct Ma120DeviationStrategy;

impl Ma120DeviationStrategy {
    /// Signal 1: price at or below 85% of MA120.
    pub const SIGNAL_1_THRESHOLD: f64 = 0.85;
    /// Signal 2: price at or below 80% of the signal 1 entry.
    pub const SIGNAL_2_THRESHOLD: f64 = 0.80;
    pub const SIGNAL_1_POSITION_SIZE: f64 = 0.20;
    pub const SIGNAL_2_POSITION_SIZE: f64 = 0.20;

    pub fn new() -> Self {
        Self
    }

    fn check_signal_1(&self, data: &StockData) -> Option<Signal> {
        // An unusable average must not trigger anything, and must not divide.
        let Some(deviation) = data.ma120_deviation() else {
            warn!(symbol = %data.symbol, ma120 = data.ma120, "MA120 unusable, skipping signal 1 check");
            return None;
        };

        let trigger_price = data.ma120 * Self::SIGNAL_1_THRESHOLD;
        if data.current_price > trigger_price {
            return None;
        }

        info!(
            symbol = %data.symbol,
            price = data.current_price,
            trigger = trigger_price,
            "signal 1 triggered"
        );

        Some(Signal {
            signal_type: SignalType::Signal1,
            symbol: data.symbol.clone(),
            name: data.name.clone(),
            current_price: data.current_price,
            ma120: data.ma120,
            deviation_pct: deviation,
            position_size: Self::SIGNAL_1_POSITION_SIZE,
            timestamp: data.timestamp,
            signal_1_price: None,
        })
    }

    fn check_signal_2(&self, data: &StockData, state: &SignalState) -> Option<Signal> {
        let Some(entry_price) = state.signal_1_price else {
            error!(symbol = %data.symbol, "signal 1 marked triggered without a recorded price");
            return None;
        };

        let trigger_price = entry_price * Self::SIGNAL_2_THRESHOLD;
        if data.current_price > trigger_price {
            return None;
        }

        info!(
            symbol = %data.symbol,
            price = data.current_price,
            trigger = trigger_price,
            "signal 2 triggered"
        );

        Some(Signal {
            signal_type: SignalType::Signal2,
            symbol: data.symbol.clone(),
            name: data.name.clone(),
            current_price: data.current_price,
            ma120: data.ma120,
            deviation_pct: (data.current_price - entry_price) / entry_price * 100.0,
            position_size: Self::SIGNAL_2_POSITION_SIZE,
            timestamp: data.timestamp,
            signal_1_price: Some(entry_price),
        })
    }
}

impl Strategy for Ma120DeviationStrategy {
    fn name(&self) -> &'static str {
        "MA120 Deviation"
    }

    fn evaluate(&self, data: &StockData, state: &mut SignalState) -> Vec<Signal> {
        let mut signals = Vec::new();

        // A completed ladder resets before thresholds are checked, so a
        // deep enough price can open a fresh ladder in the same run.
        if state.should_reset() {
            info!(symbol = %data.symbol, "ladder complete, resetting state");
            state.reset();
        }

        if state.signal_1_triggered && !state.signal_2_triggered {
            if let Some(signal) = self.check_signal_2(data, state) {
                signals.push(signal);
                // One signal per symbol per run.
                return signals;
            }
        }

        if !state.signal_1_triggered {
            if let Some(signal) = self.check_signal_1(data) {
                signals.push(signal);
            }
        }

        signals
    }

    fn update_state(&self, signal: &Signal, state: &mut SignalState) {
        match signal.signal_type {
            SignalType::Signal1 => {
                state.signal_1_triggered = true;
                state.signal_1_price = Some(signal.current_price);
                state.signal_1_date = Some(signal.timestamp.date_naive());
                info!(
                    symbol = %signal.symbol,
                    price = signal.current_price,
                    "recorded signal 1 into state"
                );
            }
            SignalType::Signal2 => {
                state.signal_2_triggered = true;
                state.signal_2_price = Some(signal.current_price);
                state.signal_2_date = Some(signal.timestamp.date_naive());
                info!(
                    symbol = %signal.symbol,
                    price = signal.current_price,
                    "recorded signal 2 into state"
                );
            }
        }
    }
}
