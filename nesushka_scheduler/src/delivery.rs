use async_trait::async_trait;

use nesushka_models::user::UserId;

/// Outbound side of the reminder loop. The poller is the only caller;
/// a failed send is logged and isolated to that user.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn send_reminder(&self, user: UserId) -> anyhow::Result<()>;
}
