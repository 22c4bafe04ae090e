//! Telegram Bot API delivery
//!
//! Single sendMessage call with Markdown parse mode. Telegram wraps every
//! reply in an ok/description envelope, so a 200 can still be a failure.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::error::NotifyError;
use crate::notifications::Notifier;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    chat_id: String,
    url: String,
}

impl TelegramNotifier {
    pub fn new(client: Client, bot_token: &str, chat_id: String) -> Self {
        Self {
            client,
            chat_id,
            url: format!("https://api.telegram.org/bot{bot_token}/sendMessage"),
        }
    }

    async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let payload = json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });

        let resp = self.client.post(&self.url).json(&payload).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(NotifyError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let api: ApiResponse = serde_json::from_str(&body).map_err(|_| NotifyError::Api {
            description: format!("unparsable response: {body}"),
        })?;

        if api.ok {
            Ok(())
        } else {
            Err(NotifyError::Api {
                description: api
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            })
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn deliver(&self, text: &str) -> bool {
        info!(chars = text.chars().count(), "sending telegram message");
        match self.send_message(text).await {
            Ok(()) => {
                info!("telegram message sent");
                true
            }
            Err(e) => {
                error!(error = %e, "telegram delivery failed");
                false
            }
        }
    }
}
