use std::sync::Arc;

use actix_web::{HttpResponse, web};
use tracing::{error, info, warn};

use super::Command;
use crate::models::{Recipient, Update};
use crate::notify::Notifier;

#[derive(Clone)]
pub struct WebhookState {
    notifier: Arc<dyn Notifier>,
}

impl WebhookState {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig, path_prefix: &str) {
    cfg.service(web::scope(path_prefix).route("/handle", web::post().to(handle_update)));
}

/// Always answers 200 with an empty body; the reply travels through the
/// Bot API, not the webhook response.
async fn handle_update(state: web::Data<WebhookState>, body: web::Bytes) -> HttpResponse {
    match serde_json::from_slice::<Update>(&body) {
        Ok(update) => {
            dispatch(state.notifier.as_ref(), update).await;
        }
        Err(e) => warn!(error = %e, "could not decode incoming update"),
    }
    HttpResponse::Ok().finish()
}

/// Classifies the update's text and sends the canned reply to its chat.
/// Returns the command that was answered, if any.
pub async fn dispatch(notifier: &dyn Notifier, update: Update) -> Option<Command> {
    let Some(message) = update.message else {
        info!(update_id = ?update.update_id, "update without message ignored");
        return None;
    };

    let command = Command::parse(message.text.as_deref());
    let chat_id = message.chat.id;
    info!(chat_id, ?command, "webhook command");

    match notifier
        .send_text(Recipient::chat(chat_id), command.reply())
        .await
    {
        Ok(_) => info!(chat_id, "reply delivered"),
        Err(e) => error!(chat_id, error = %e, "reply failed"),
    }
    Some(command)
}
