use async_trait::async_trait;

use nesushka_models::{
    settings::{ReminderSettings, ReminderTime, UtcOffset},
    user::UserId,
};

/// Partial settings update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsPatch {
    pub enabled: Option<bool>,
    pub remind_at: Option<ReminderTime>,
    pub utc_offset: Option<UtcOffset>,
}

#[async_trait]
pub trait ReminderSettingsStorage: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn get(&self, user_id: UserId) -> Result<Option<ReminderSettings>, Self::Error>;
    /// Creates the row with defaults first if the user has none, then
    /// applies the patch.
    async fn upsert(
        &self,
        user_id: UserId,
        patch: SettingsPatch,
    ) -> Result<ReminderSettings, Self::Error>;
    /// All users with reminders switched on.
    async fn enabled(&self) -> Result<Vec<ReminderSettings>, Self::Error>;

    async fn get_or_default(&self, user_id: UserId) -> Result<ReminderSettings, Self::Error> {
        Ok(self
            .get(user_id)
            .await?
            .unwrap_or_else(|| ReminderSettings::defaults_for(user_id)))
    }
}
