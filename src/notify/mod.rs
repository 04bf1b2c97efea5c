pub mod broadcast;
pub mod telegram;

pub use broadcast::{DeliveryReport, broadcast};
pub use telegram::{SendMessageForm, TelegramClient};

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::Recipient;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers `text` to one recipient, returning the platform's raw reply.
    async fn send_text(&self, recipient: Recipient, text: &str) -> AppResult<String>;
}
