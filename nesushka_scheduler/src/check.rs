use chrono::{DateTime, Timelike, Utc};

use nesushka_models::settings::ReminderSettings;

/// The per-user firing decision for one tick. Fires only on an exact
/// local HH:MM match, so with a one-minute tick a user is notified once
/// during the matching minute; a tick that skips past that minute skips
/// the notification for the day entirely (no catch-up).
///
/// `has_today_entry` is "has a record dated today in UTC" — the offset
/// decides the firing instant, never which records count as today.
pub fn should_fire(
    settings: &ReminderSettings,
    has_today_entry: bool,
    now: DateTime<Utc>,
) -> bool {
    if !settings.enabled || has_today_entry {
        return false;
    }

    let local = settings.utc_offset.local_time(now);
    let target = settings.remind_at.time();

    local.hour() == target.hour() && local.minute() == target.minute()
}
