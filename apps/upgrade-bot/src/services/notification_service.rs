use crate::flow::messenger::{Messenger, TextFormat};
use tracing::{info, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NotifyReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Fans purchase notices out to the configured administrators.
#[derive(Debug, Clone, Default)]
pub struct NotificationService {
    admin_ids: Vec<i64>,
}

impl NotificationService {
    pub fn new(admin_ids: Vec<i64>) -> Self {
        Self { admin_ids }
    }

    pub fn is_admin(&self, tg_id: i64) -> bool {
        self.admin_ids.contains(&tg_id)
    }

    /// Sends `text` to every administrator. Each send is independent: a failure
    /// is logged and the remaining administrators are still notified.
    pub async fn notify_admins(&self, messenger: &dyn Messenger, text: &str) -> NotifyReport {
        let mut report = NotifyReport::default();

        for admin_id in &self.admin_ids {
            match messenger.send_text(*admin_id, text, TextFormat::Html).await {
                Ok(()) => {
                    report.delivered += 1;
                    info!("✓ Notified admin {}", admin_id);
                }
                Err(e) => {
                    report.failed += 1;
                    warn!("✗ Failed to notify admin {}: {}", admin_id, e);
                }
            }
        }

        report
    }
}
