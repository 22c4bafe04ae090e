use std::time::Duration;

use chrono::Utc;
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use trading_signal_bot::config::{tracked_stocks, Settings};
use trading_signal_bot::data::fetcher::DataFetcherManager;
use trading_signal_bot::error::BotError;
use trading_signal_bot::i18n::Translator;
use trading_signal_bot::notifications::formatter::MessageFormatter;
use trading_signal_bot::notifications::telegram::TelegramNotifier;
use trading_signal_bot::notifications::Notifier;
use trading_signal_bot::runner::process_stocks;
use trading_signal_bot::storage::SignalStore;
use trading_signal_bot::strategy::ma120_deviation::Ma120DeviationStrategy;
use trading_signal_bot::strategy::Strategy;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), BotError> {
    // Load environment variables from .env if present
    dotenv().ok();

    // Setup Logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting trading signal bot...");

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "configuration is incomplete");
            return Err(e.into());
        }
    };
    info!(
        locale = %settings.locale,
        timezone = %settings.timezone,
        state_file = %settings.state_file.display(),
        backup_provider = settings.alpha_vantage_api_key.is_some(),
        "settings loaded"
    );

    let client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;

    let fetcher = DataFetcherManager::new(client.clone(), settings.alpha_vantage_api_key.clone());
    let strategy = Ma120DeviationStrategy::new();
    info!(strategy = strategy.name(), "strategy ready");
    let store = SignalStore::new(&settings.state_file);
    let formatter = MessageFormatter::new(Translator::new(&settings.locale));
    let notifier = TelegramNotifier::new(
        client,
        &settings.telegram_bot_token,
        settings.telegram_chat_id.clone(),
    );

    let mut states = match store.load_all() {
        Ok(states) => states,
        Err(e) => {
            error!(error = %e, "could not load signal state");
            notifier.deliver(&formatter.format_error(&e.to_string())).await;
            return Err(e.into());
        }
    };

    let stocks = tracked_stocks();
    info!(stocks = stocks.len(), "processing tracked stocks");
    let outcome = process_stocks(&fetcher, &strategy, &mut states, &stocks).await;

    if let Err(e) = store.save_all(&states) {
        error!(error = %e, "could not save signal state");
        notifier.deliver(&formatter.format_error(&e.to_string())).await;
        return Err(e.into());
    }

    let summary = formatter.format_summary(
        &outcome.signals,
        Utc::now(),
        &outcome.stock_data,
        &outcome.fetch_errors,
    );
    if !notifier.deliver(&summary).await {
        warn!("summary notification was not delivered");
    }

    info!(
        stocks = stocks.len(),
        signals = outcome.signals.len(),
        "run complete"
    );
    Ok(())
}
