//! Core value types shared across fetch, strategy, and notification

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One fetched price/MA snapshot for a symbol. Never persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StockData {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub ma120: f64,
    pub timestamp: DateTime<Utc>,
    /// Trading days that went into the moving average.
    pub days_of_data: usize,
}

impl StockData {
    /// Percent deviation of the current price from MA120.
    ///
    /// Returns None when the average is missing or non-positive, so callers
    /// never divide by a useless denominator.
    pub fn ma120_deviation(&self) -> Option<f64> {
        if self.ma120.is_finite() && self.ma120 > 0.0 {
            Some((self.current_price - self.ma120) / self.ma120 * 100.0)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalType {
    #[serde(rename = "signal_1")]
    Signal1,
    #[serde(rename = "signal_2")]
    Signal2,
}

/// A threshold crossing emitted by the strategy during one run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Signal {
    pub signal_type: SignalType,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub ma120: f64,
    /// Percent drop vs MA120 for signal 1, vs the signal 1 entry for signal 2.
    pub deviation_pct: f64,
    /// Suggested position as a fraction of capital (0.20 = 20%).
    pub position_size: f64,
    pub timestamp: DateTime<Utc>,
    /// Entry price of the first tranche; set on signal 2 events.
    pub signal_1_price: Option<f64>,
}

impl Signal {
    /// Position size rendered for messages, e.g. "20%".
    pub fn position_size_display(&self) -> String {
        format!("{:.0}%", self.position_size * 100.0)
    }
}

/// Per-symbol ladder state, persisted between runs.
///
/// State machine: none -> signal 1 -> signal 2 -> reset to none on the
/// next evaluation. `signal_2_triggered` implies `signal_1_triggered`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalState {
    pub symbol: String,
    #[serde(default)]
    pub signal_1_triggered: bool,
    #[serde(default)]
    pub signal_1_price: Option<f64>,
    #[serde(default)]
    pub signal_1_date: Option<NaiveDate>,
    #[serde(default)]
    pub signal_2_triggered: bool,
    #[serde(default)]
    pub signal_2_price: Option<f64>,
    #[serde(default)]
    pub signal_2_date: Option<NaiveDate>,
}

impl SignalState {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            signal_1_triggered: false,
            signal_1_price: None,
            signal_1_date: None,
            signal_2_triggered: false,
            signal_2_price: None,
            signal_2_date: None,
        }
    }

    /// Both tranches filled in a prior run; the ladder restarts on the next
    /// evaluation.
    pub fn should_reset(&self) -> bool {
        self.signal_1_triggered && self.signal_2_triggered
    }

    /// Clears the ladder back to the zero state, keeping the symbol.
    pub fn reset(&mut self) {
        self.signal_1_triggered = false;
        self.signal_1_price = None;
        self.signal_1_date = None;
        self.signal_2_triggered = false;
        self.signal_2_price = None;
        self.signal_2_date = None;
    }
}
