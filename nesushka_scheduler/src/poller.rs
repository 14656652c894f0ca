use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use tokio_util::sync::CancellationToken;

use nesushka_models::settings::ReminderSettings;
use nesushka_storage::{EggRecordStorage, ReminderSettingsStorage};

use crate::{NotificationChannel, should_fire};

pub const TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Upper bound on a single send, so one unreachable recipient cannot
/// stall the rest of the tick.
const DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Polls reminder settings once a minute and notifies every enabled
/// user who has not logged anything today (UTC) when their local time
/// matches the configured minute. There is no durable "already sent"
/// flag: the absence of a same-day record is itself the guard.
pub struct ReminderPoller<R, S, C> {
    records: R,
    settings: S,
    channel: C,
}

impl<R, S, C> ReminderPoller<R, S, C>
where
    R: EggRecordStorage,
    S: ReminderSettingsStorage,
    C: NotificationChannel,
{
    pub fn new(records: R, settings: S, channel: C) -> Self {
        Self {
            records,
            settings,
            channel,
        }
    }

    /// Runs until the token is cancelled. Cancellation is only observed
    /// between ticks, so an in-flight tick always finishes.
    pub async fn run(self, cancellation_token: CancellationToken) {
        log::info!("Reminder poller started, tick interval {TICK_INTERVAL:?}");
        loop {
            tokio::select! {
                _ = cancellation_token.cancelled() => {
                    log::info!("Reminder poller shutting down");
                    break;
                }
                _ = tokio::time::sleep(TICK_INTERVAL) => {
                    self.tick(Utc::now()).await;
                }
            }
        }
    }

    /// One poll pass. Per-user failures are logged and contained; the
    /// pass always completes for the remaining users.
    pub async fn tick(&self, now: DateTime<Utc>) {
        let enabled = match self.settings.enabled().await {
            Ok(enabled) => enabled,
            Err(e) => {
                log::error!("Failed to load reminder settings, skipping tick: {e}");
                return;
            }
        };

        let today = now.date_naive();
        for settings in &enabled {
            if let Err(e) = self.check_user(settings, today, now).await {
                log::warn!("Reminder check failed for user {}: {e:#}", settings.user_id);
            }
        }
    }

    async fn check_user(
        &self,
        settings: &ReminderSettings,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let has_today_entry = self.records.has_record_on(settings.user_id, today).await?;
        if !should_fire(settings, has_today_entry, now) {
            return Ok(());
        }

        log::info!("Dispatching daily reminder to user {}", settings.user_id);
        tokio::time::timeout(DISPATCH_TIMEOUT, self.channel.send_reminder(settings.user_id))
            .await
            .with_context(|| format!("dispatch timed out after {DISPATCH_TIMEOUT:?}"))?
    }
}
