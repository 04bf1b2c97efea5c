use tracing::{error, info};

use super::Notifier;
use crate::models::Recipient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Sends `text` to every recipient in order. A failed delivery is logged and
/// the loop moves on to the next recipient.
pub async fn broadcast(
    notifier: &dyn Notifier,
    recipients: &[Recipient],
    text: &str,
) -> DeliveryReport {
    let mut report = DeliveryReport::default();
    for recipient in recipients {
        match notifier.send_text(*recipient, text).await {
            Ok(_) => {
                report.delivered += 1;
                info!(chat_id = recipient.chat_id, "message delivered");
            }
            Err(e) => {
                report.failed += 1;
                error!(chat_id = recipient.chat_id, error = %e, "delivery failed");
            }
        }
    }
    report
}
