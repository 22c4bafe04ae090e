//! Buy-signal strategies

pub mod ma120_deviation;


use crate::models::{Signal, SignalState, StockData};

/// A buy-signal strategy, evaluated once per symbol per run.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Evaluates one price snapshot against the persisted state. The only
    /// mutation allowed here is resetting a completed ladder; recording an
    /// emitted signal happens in `update_state`.
    fn evaluate(&self, data: &StockData, state: &mut SignalState) -> Vec<Signal>;

    /// Records an emitted signal into the persisted state.
    fn update_state(&self, signal: &Signal, state: &mut SignalState);
}
