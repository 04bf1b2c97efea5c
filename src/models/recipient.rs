use serde::{Deserialize, Serialize};

/// A chat (and optional forum thread) that receives every broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub chat_id: i64,
    #[serde(default)]
    pub message_thread_id: i64,
}

impl Recipient {
    pub fn new(chat_id: i64, message_thread_id: i64) -> Self {
        Self {
            chat_id,
            message_thread_id,
        }
    }

    pub fn chat(chat_id: i64) -> Self {
        Self::new(chat_id, 0)
    }
}
