//! Run summary and error message formatting
//!
//! One Markdown message per run. Percentages only, no dollar deltas, and
//! every user-visible label comes from the locale tables. Output is
//! deterministic for a given input so the layout can be asserted in tests.

use chrono::{DateTime, Utc};

use crate::data::fetcher::FetchError;
use crate::i18n::Translator;
use crate::models::{Signal, SignalType, StockData};
use crate::notifications::catalog::StrategyCatalog;

/// Signal 1 sits at -15%; these mark how close a stock is to it.
const CLOSEST_DEVIATION: f64 = -12.0;
const APPROACHING_DEVIATION: f64 = -10.0;

pub struct MessageFormatter {
    t: Translator,
    strategy_key: String,
    catalog: StrategyCatalog,
}

impl MessageFormatter {
    pub fn new(translator: Translator) -> Self {
        Self {
            t: translator,
            strategy_key: "ma120_deviation".to_string(),
            catalog: StrategyCatalog::embedded(),
        }
    }

    /// The run summary: the signal list when anything fired, otherwise a
    /// status digest of every fetched stock plus any fetch failures.
    pub fn format_summary(
        &self,
        signals: &[Signal],
        run_time: DateTime<Utc>,
        all_stock_data: &[StockData],
        fetch_errors: &[FetchError],
    ) -> String {
        if signals.is_empty() {
            return self.status_summary(run_time, all_stock_data, fetch_errors);
        }

        let mut lines = vec![
            self.t.get("summary.title"),
            String::new(),
            self.date_line(run_time),
            format!(
                "{}: {}",
                self.t.get("summary.signals_generated"),
                signals.len()
            ),
            String::new(),
            rule(),
        ];

        for (idx, signal) in signals.iter().enumerate() {
            let index = (idx + 1).to_string();
            let price = format!("{:.2}", signal.current_price);
            let kind = match signal.signal_type {
                SignalType::Signal1 => self.t.get("signal.signal_1"),
                SignalType::Signal2 => self.t.get("signal.signal_2"),
            };

            lines.push(String::new());
            lines.push(self.t.get_with(
                "signal.entry",
                &[
                    ("index", index.as_str()),
                    ("symbol", signal.symbol.as_str()),
                    ("name", signal.name.as_str()),
                ],
            ));
            lines.push(self.t.get_with("signal.type", &[("kind", kind.as_str())]));
            lines.push(self.t.get_with("signal.price", &[("price", price.as_str())]));

            match signal.signal_type {
                SignalType::Signal1 => {
                    let ma120 = format!("{:.2}", signal.ma120);
                    let dev = format!("{:.2}", signal.deviation_pct.abs());
                    lines.push(self.t.get_with(
                        "signal.ma120_detail",
                        &[("ma120", ma120.as_str()), ("dev", dev.as_str())],
                    ));
                }
                SignalType::Signal2 => {
                    let entry = format!(
                        "{:.2}",
                        signal.signal_1_price.unwrap_or(signal.current_price)
                    );
                    lines.push(
                        self.t
                            .get_with("signal.signal_1_price", &[("price", entry.as_str())]),
                    );
                }
            }

            let size = signal.position_size_display();
            lines.push(self.t.get_with("signal.position", &[("size", size.as_str())]));
            lines.push(rule());
        }

        lines.push(String::new());
        lines.push(self.footer());
        lines.join("\n")
    }

    /// An error notification for fatal failures (bad state file, broken
    /// config discovered mid-run).
    pub fn format_error(&self, error_message: &str) -> String {
        [
            self.t.get("notification.error_title"),
            String::new(),
            self.t.get("notification.error_details"),
            String::new(),
            format!("```\n{error_message}\n```"),
            String::new(),
            self.t.get("notification.check_logs"),
        ]
        .join("\n")
    }

    fn status_summary(
        &self,
        run_time: DateTime<Utc>,
        all_stock_data: &[StockData],
        fetch_errors: &[FetchError],
    ) -> String {
        let mut lines = vec![
            self.t.get("summary.title"),
            String::new(),
            self.date_line(run_time),
            format!("{}: 0", self.t.get("summary.signals_generated")),
            String::new(),
            self.t.get("summary.no_signals"),
        ];

        if !all_stock_data.is_empty() {
            lines.push(String::new());
            lines.push(self.t.get("status.header"));
            lines.push(String::new());
            for stock in all_stock_data {
                lines.push(self.status_line(stock));
            }
        }

        if !fetch_errors.is_empty() {
            lines.push(String::new());
            lines.push(self.t.get("errors.header"));
            lines.push(String::new());
            for error in fetch_errors {
                lines.push(self.t.get_with(
                    "errors.entry",
                    &[
                        ("symbol", error.symbol.as_str()),
                        ("name", error.name.as_str()),
                    ],
                ));
                lines.push(format!("  `{}`", error.error_message));
            }
        }

        lines.push(String::new());
        lines.push(self.footer());
        lines.join("\n")
    }

    fn status_line(&self, stock: &StockData) -> String {
        let price = format!("{:.2}", stock.current_price);

        let Some(deviation) = stock.ma120_deviation() else {
            return self.t.get_with(
                "status.line_plain",
                &[
                    ("symbol", stock.symbol.as_str()),
                    ("price", price.as_str()),
                ],
            );
        };

        let dev = format!("{:.2}", deviation.abs());
        let key = if deviation > 0.0 {
            "status.line_above"
        } else {
            "status.line_below"
        };
        let mut line = self.t.get_with(
            key,
            &[
                ("symbol", stock.symbol.as_str()),
                ("price", price.as_str()),
                ("dev", dev.as_str()),
            ],
        );

        if deviation < CLOSEST_DEVIATION {
            line.push_str(&self.t.get("status.closest_to_trigger"));
        } else if deviation < APPROACHING_DEVIATION {
            line.push_str(&self.t.get("status.approaching_trigger"));
        }

        line
    }

    fn date_line(&self, run_time: DateTime<Utc>) -> String {
        format!(
            "{}: {}",
            self.t.get("summary.date"),
            run_time.format("%Y-%m-%d %H:%M UTC")
        )
    }

    fn footer(&self) -> String {
        let mut lines = vec![rule(), format!("_{}_", self.t.get("summary.footer"))];

        let description = self.catalog.description(&self.strategy_key, self.t.locale());
        if !description.is_empty() {
            lines.push(String::new());
            lines.push(self.t.get("strategy_info.header"));
            for line in description.lines().filter(|l| !l.trim().is_empty()) {
                lines.push(line.to_string());
            }
        }

        lines.join("\n")
    }
}

fn rule() -> String {
    "─".repeat(40)
}
