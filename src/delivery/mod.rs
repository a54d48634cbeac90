pub mod sendgrid;

use async_trait::async_trait;

use crate::{error::ReminderResult, models::notification::NotificationRequest};

/// Channel that delivers a reminder at its scheduled instant.
///
/// Returning `Ok` means the channel accepted the request; a rejection is
/// reported as `ReminderError::NotificationRejected`.
#[async_trait]
pub trait NotificationSink: Send + Sync + 'static {
    async fn send(&self, request: &NotificationRequest) -> ReminderResult<()>;
}

/// Accepts every request and only logs it.
pub struct LogNotificationSink;

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn send(&self, request: &NotificationRequest) -> ReminderResult<()> {
        log::info!(
            "[DRY RUN] Would email {} at {}: {}",
            request.recipient(),
            request.send_at(),
            request.message()
        );
        Ok(())
    }
}
