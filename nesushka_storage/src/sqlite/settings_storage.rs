mod model;

use async_trait::async_trait;
use model::SettingsRow;
use thiserror::Error;

use nesushka_models::{settings::ReminderSettings, user::UserId};

use crate::settings::{ReminderSettingsStorage, SettingsPatch};

#[derive(Debug, Error)]
pub enum SqliteSettingsError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub struct SqliteReminderSettingsStorage {
    pool: sqlx::SqlitePool,
}

impl SqliteReminderSettingsStorage {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReminderSettingsStorage for SqliteReminderSettingsStorage {
    type Error = SqliteSettingsError;

    async fn get(&self, user_id: UserId) -> Result<Option<ReminderSettings>, Self::Error> {
        let settings =
            sqlx::query_as::<_, SettingsRow>("SELECT * FROM user_settings WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(settings.map(Into::into))
    }

    async fn upsert(
        &self,
        user_id: UserId,
        patch: SettingsPatch,
    ) -> Result<ReminderSettings, Self::Error> {
        let mut settings = self
            .get(user_id)
            .await?
            .unwrap_or_else(|| ReminderSettings::defaults_for(user_id));

        if let Some(enabled) = patch.enabled {
            settings.enabled = enabled;
        }
        if let Some(remind_at) = patch.remind_at {
            settings.remind_at = remind_at;
        }
        if let Some(utc_offset) = patch.utc_offset {
            settings.utc_offset = utc_offset;
        }

        let row = SettingsRow::from(settings);
        let stored = sqlx::query_as::<_, SettingsRow>(
            "INSERT INTO user_settings (user_id, enabled, remind_at, utc_offset)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE
             SET enabled = excluded.enabled,
                 remind_at = excluded.remind_at,
                 utc_offset = excluded.utc_offset
             RETURNING *",
        )
        .bind(row.user_id)
        .bind(row.enabled)
        .bind(row.remind_at)
        .bind(row.utc_offset)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored.into())
    }

    async fn enabled(&self) -> Result<Vec<ReminderSettings>, Self::Error> {
        let rows =
            sqlx::query_as::<_, SettingsRow>("SELECT * FROM user_settings WHERE enabled = 1")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::init_schema;
    use nesushka_models::settings::{ReminderTime, UtcOffset};
    use sqlx::{Pool, Sqlite};

    #[sqlx::test]
    async fn upsert_creates_row_with_defaults_then_applies_patch(pool: Pool<Sqlite>) {
        init_schema(&pool).await.unwrap();
        let storage = SqliteReminderSettingsStorage::new(pool);

        assert_eq!(storage.get(7).await.unwrap(), None);

        let stored = storage
            .upsert(
                7,
                SettingsPatch {
                    enabled: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(stored.enabled);
        // untouched fields keep documented defaults
        assert_eq!(stored.remind_at.to_string(), "20:00");
        assert_eq!(stored.utc_offset.to_string(), "+03:00");
    }

    #[sqlx::test]
    async fn upsert_is_partial(pool: Pool<Sqlite>) {
        init_schema(&pool).await.unwrap();
        let storage = SqliteReminderSettingsStorage::new(pool);

        storage
            .upsert(
                7,
                SettingsPatch {
                    enabled: Some(true),
                    remind_at: Some("19:00".parse::<ReminderTime>().unwrap()),
                    utc_offset: Some("+05:00".parse::<UtcOffset>().unwrap()),
                },
            )
            .await
            .unwrap();

        let stored = storage
            .upsert(
                7,
                SettingsPatch {
                    remind_at: Some("07:30".parse::<ReminderTime>().unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(stored.enabled);
        assert_eq!(stored.remind_at.to_string(), "07:30");
        assert_eq!(stored.utc_offset.to_string(), "+05:00");
    }

    #[sqlx::test]
    async fn enabled_returns_only_switched_on_users(pool: Pool<Sqlite>) {
        init_schema(&pool).await.unwrap();
        let storage = SqliteReminderSettingsStorage::new(pool);

        storage
            .upsert(1, SettingsPatch { enabled: Some(true), ..Default::default() })
            .await
            .unwrap();
        storage
            .upsert(2, SettingsPatch { enabled: Some(false), ..Default::default() })
            .await
            .unwrap();
        storage
            .upsert(3, SettingsPatch { enabled: Some(true), ..Default::default() })
            .await
            .unwrap();

        let mut enabled: Vec<_> = storage
            .enabled()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.user_id)
            .collect();
        enabled.sort_unstable();

        assert_eq!(enabled, vec![1, 3]);
    }
}
