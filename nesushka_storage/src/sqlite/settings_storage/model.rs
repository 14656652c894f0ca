use nesushka_models::settings::{ReminderSettings, ReminderTime, UtcOffset};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SettingsRow {
    pub user_id: i64,
    pub enabled: bool,
    pub remind_at: String,
    pub utc_offset: i64,
}

impl From<ReminderSettings> for SettingsRow {
    fn from(value: ReminderSettings) -> Self {
        Self {
            user_id: value.user_id,
            enabled: value.enabled,
            remind_at: value.remind_at.to_string(),
            utc_offset: value.utc_offset.minutes() as i64,
        }
    }
}

impl From<SettingsRow> for ReminderSettings {
    fn from(value: SettingsRow) -> Self {
        let remind_at = value.remind_at.parse().unwrap_or_else(|_| {
            log::warn!(
                "Unparseable remind_at {:?} for user {}, falling back to default",
                value.remind_at,
                value.user_id
            );
            ReminderTime::default()
        });

        let utc_offset = i32::try_from(value.utc_offset)
            .ok()
            .and_then(|minutes| UtcOffset::from_minutes(minutes).ok())
            .unwrap_or_else(|| {
                log::warn!(
                    "Out-of-range utc_offset {} for user {}, falling back to default",
                    value.utc_offset,
                    value.user_id
                );
                UtcOffset::default()
            });

        Self {
            user_id: value.user_id,
            enabled: value.enabled,
            remind_at,
            utc_offset,
        }
    }
}
