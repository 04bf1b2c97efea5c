use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::{debug, info, instrument};

use super::Notifier;
use crate::errors::{AppError, AppResult};
use crate::messages::BOT_TAG;
use crate::models::Recipient;

/// Form fields of a Bot API `sendMessage` call.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageForm<'a> {
    pub chat_id: i64,
    pub message_thread_id: i64,
    pub via_bot: &'a str,
    pub text: &'a str,
}

impl<'a> SendMessageForm<'a> {
    pub fn new(recipient: Recipient, text: &'a str) -> Self {
        Self {
            chat_id: recipient.chat_id,
            message_thread_id: recipient.message_thread_id,
            via_bot: BOT_TAG,
            text,
        }
    }

    pub fn encode(&self) -> AppResult<String> {
        serde_urlencoded::to_string(self)
            .map_err(|e| AppError::Other(format!("unable to encode telegram form: {e}")))
    }
}

#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    send_url: String,
}

impl TelegramClient {
    pub fn new(http: Client, send_url: impl Into<String>) -> Self {
        Self {
            http,
            send_url: send_url.into(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    #[instrument(skip(self, text), fields(chat_id = recipient.chat_id))]
    async fn send_text(&self, recipient: Recipient, text: &str) -> AppResult<String> {
        info!(len = text.len(), "sending message");
        let body = SendMessageForm::new(recipient, text).encode()?;
        let response = self
            .http
            .post(&self.send_url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let reply = response.text().await?;
        debug!(status = %status, body = %reply, "telegram responded");
        if !status.is_success() {
            return Err(AppError::Upstream {
                service: "telegram",
                status: status.as_u16(),
                body: reply,
            });
        }
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_carries_recipient_tag_and_text() {
        let body = SendMessageForm::new(Recipient::new(111, 0), "EU 🔴 High")
            .encode()
            .unwrap();
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(&body).unwrap();

        assert!(body.starts_with("chat_id=111&message_thread_id=0&"));
        assert!(pairs.contains(&("via_bot".into(), BOT_TAG.into())));
        assert!(pairs.contains(&("text".into(), "EU 🔴 High".into())));
    }
}
