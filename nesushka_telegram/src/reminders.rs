use teloxide::prelude::*;

use nesushka_models::settings::{ReminderSettings, ReminderTime, UtcOffset};
use nesushka_storage::{ReminderSettingsStorage, SettingsPatch};

use crate::{HandlerResult, SharedSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReminderAction {
    Show,
    Enable,
    Disable,
    SetTime(ReminderTime),
    SetOffset(UtcOffset),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReminderArgError {
    UnknownAction,
    BadTime,
    BadOffset,
}

/// `/reminders` argument grammar: empty, `on`, `off`, `time HH:MM`,
/// `tz ±HH:MM`.
pub(crate) fn parse_action(args: &str) -> Result<ReminderAction, ReminderArgError> {
    let mut words = args.split_whitespace();

    let Some(action) = words.next() else {
        return Ok(ReminderAction::Show);
    };

    match (action.to_lowercase().as_str(), words.next()) {
        ("on", None) => Ok(ReminderAction::Enable),
        ("off", None) => Ok(ReminderAction::Disable),
        ("time", Some(time)) => time
            .parse::<ReminderTime>()
            .map(ReminderAction::SetTime)
            .map_err(|_| ReminderArgError::BadTime),
        ("tz", Some(offset)) => offset
            .parse::<UtcOffset>()
            .map(ReminderAction::SetOffset)
            .map_err(|_| ReminderArgError::BadOffset),
        _ => Err(ReminderArgError::UnknownAction),
    }
}

fn render_status(settings: &ReminderSettings) -> String {
    let status = if settings.enabled { "on" } else { "off" };
    format!(
        "🔔 Reminder settings:\n\
         Status: {status}\n\
         Time: {} (your time, UTC{})\n\n\
         /reminders on — enable\n\
         /reminders off — disable\n\
         /reminders time HH:MM — set the time\n\
         /reminders tz ±HH:MM — set your UTC offset",
        settings.remind_at, settings.utc_offset
    )
}

pub(crate) async fn manage(
    bot: Bot,
    settings: SharedSettings,
    args: String,
    msg: Message,
) -> HandlerResult {
    let action = match parse_action(&args) {
        Ok(action) => action,
        Err(e) => {
            let reply = match e {
                ReminderArgError::BadTime => "❌ Invalid time format, expected HH:MM.",
                ReminderArgError::BadOffset => {
                    "❌ Invalid offset format, expected ±HH:MM (e.g. +03:00 or -05:00)."
                }
                ReminderArgError::UnknownAction => {
                    "❌ Unknown action. Use /reminders without arguments to see the options."
                }
            };
            bot.send_message(msg.chat.id, reply).await?;
            return Ok(());
        }
    };

    let user_id = msg.chat.id.0;
    let reply = match action {
        ReminderAction::Show => {
            let current = settings.get_or_default(user_id).await?;
            render_status(&current)
        }
        ReminderAction::Enable => {
            settings
                .upsert(user_id, SettingsPatch { enabled: Some(true), ..Default::default() })
                .await?;
            "🔔 Reminders enabled!".to_string()
        }
        ReminderAction::Disable => {
            settings
                .upsert(user_id, SettingsPatch { enabled: Some(false), ..Default::default() })
                .await?;
            "🔕 Reminders disabled!".to_string()
        }
        ReminderAction::SetTime(remind_at) => {
            let stored = settings
                .upsert(
                    user_id,
                    SettingsPatch { remind_at: Some(remind_at), ..Default::default() },
                )
                .await?;
            format!(
                "⏰ Reminder time set to {} (UTC{})",
                stored.remind_at, stored.utc_offset
            )
        }
        ReminderAction::SetOffset(utc_offset) => {
            let stored = settings
                .upsert(
                    user_id,
                    SettingsPatch { utc_offset: Some(utc_offset), ..Default::default() },
                )
                .await?;
            format!(
                "🌍 UTC offset set to {}\nReminders will arrive at {} your time",
                stored.utc_offset, stored.remind_at
            )
        }
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_args_show_status() {
        assert_eq!(parse_action(""), Ok(ReminderAction::Show));
        assert_eq!(parse_action("   "), Ok(ReminderAction::Show));
    }

    #[test]
    fn on_off_toggle() {
        assert_eq!(parse_action("on"), Ok(ReminderAction::Enable));
        assert_eq!(parse_action("OFF"), Ok(ReminderAction::Disable));
    }

    #[test]
    fn time_requires_valid_clock_value() {
        assert_eq!(
            parse_action("time 19:00"),
            Ok(ReminderAction::SetTime("19:00".parse().unwrap()))
        );
        assert_eq!(parse_action("time 25:00"), Err(ReminderArgError::BadTime));
        assert_eq!(parse_action("time"), Err(ReminderArgError::UnknownAction));
    }

    #[test]
    fn tz_requires_signed_offset() {
        assert_eq!(
            parse_action("tz +05:30"),
            Ok(ReminderAction::SetOffset("+05:30".parse().unwrap()))
        );
        assert_eq!(parse_action("tz 05:30"), Err(ReminderArgError::BadOffset));
        assert_eq!(parse_action("tz Moscow"), Err(ReminderArgError::BadOffset));
    }

    #[test]
    fn unknown_actions_are_rejected() {
        assert_eq!(parse_action("snooze"), Err(ReminderArgError::UnknownAction));
        assert_eq!(parse_action("on now"), Err(ReminderArgError::UnknownAction));
    }

    #[test]
    fn status_text_mentions_time_and_offset() {
        let text = render_status(&ReminderSettings::defaults_for(1));
        assert!(text.contains("Status: off"));
        assert!(text.contains("20:00"));
        assert!(text.contains("UTC+03:00"));
    }
}
